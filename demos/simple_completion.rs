//! Minimal usage: one plain and one streamed completion.
//!
//! ```bash
//! export OPENAI_API_KEY=your_api_key_here
//! cargo run --example simple_completion
//! ```

use quick_completion::{get_completion, CompletionOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let answer = get_completion("What is the capital of France?", &CompletionOptions::default())
        .await?;
    println!("AI: {}", answer.content());

    let options = CompletionOptions::new()
        .system_message("You respond concisely.")
        .temperature(0.7)
        .stream(true);
    let story = get_completion("Tell me a two-sentence story about a robot.", &options).await?;
    if let Some(streamed) = story.as_streamed() {
        println!("AI ({} chunks): {}", streamed.raw_response.len(), streamed.content);
    }

    Ok(())
}
