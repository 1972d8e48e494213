//! Stream adapter decoding Server-Sent Events from an HTTP body.

use crate::CallError;
use futures_util::{Stream, StreamExt};
use memchr::memmem;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Upper bound on bytes buffered while waiting for an event terminator.
const MAX_BUFFER_BYTES: usize = 1_000_000;

/// One decoded Server-Sent Event.
#[derive(Debug, Clone, PartialEq)]
pub struct SseEvent {
    pub event_type: Option<String>,
    /// `data:` lines joined with `\n`.
    pub data: String,
    pub id: Option<String>,
}

impl SseEvent {
    /// The `[DONE]` sentinel that terminates a chat-completion stream.
    pub fn is_done(&self) -> bool {
        self.data.trim() == "[DONE]"
    }
}

/// Parses SSE events out of a byte stream, handling events and UTF-8
/// sequences split across chunk boundaries.
///
/// Errors end the stream. Events decoded before an error are yielded
/// first, in body order.
pub struct SseStream<S> {
    inner: S,
    buffer: Vec<u8>,
    ready: VecDeque<Result<SseEvent, CallError>>,
    finished: bool,
}

impl<S> SseStream<S> {
    pub fn new(stream: S) -> Self {
        Self {
            inner: stream,
            buffer: Vec::new(),
            ready: VecDeque::new(),
            finished: false,
        }
    }

    fn push_bytes(&mut self, chunk: &[u8]) {
        // CR only ever appears as part of a line terminator.
        self.buffer
            .extend(chunk.iter().copied().filter(|&byte| byte != b'\r'));
    }

    /// Queue an error behind everything already decoded and stop reading.
    fn fail(&mut self, error: CallError) {
        self.buffer.clear();
        self.ready.push_back(Err(error));
        self.finished = true;
    }

    /// Move every complete event in the buffer to the ready queue.
    fn drain_complete_events(&mut self) {
        let finder = memmem::Finder::new(b"\n\n");
        let mut start = 0;

        while let Some(pos) = finder.find(&self.buffer[start..]) {
            let end = start + pos;
            match std::str::from_utf8(&self.buffer[start..end]) {
                Ok(text) => {
                    if let Some(event) = parse_event(text) {
                        self.ready.push_back(Ok(event));
                    }
                }
                Err(e) => return self.fail(invalid_utf8(e)),
            }
            start = end + 2;
        }

        if start > 0 {
            self.buffer.drain(..start);
        }
    }

    /// Parse whatever is left once the body ends without a final blank line.
    fn drain_trailing_event(&mut self) {
        let trailing = std::mem::take(&mut self.buffer);
        match std::str::from_utf8(&trailing) {
            Ok(text) => {
                if let Some(event) = parse_event(text.trim()) {
                    self.ready.push_back(Ok(event));
                }
            }
            Err(e) => self.fail(invalid_utf8(e)),
        }
    }
}

fn invalid_utf8(e: std::str::Utf8Error) -> CallError {
    CallError::stream(format!("Invalid UTF-8 in SSE event: {e}"))
}

/// Parse one event block. Blocks without `data:` lines yield nothing.
fn parse_event(block: &str) -> Option<SseEvent> {
    let mut event_type = None;
    let mut id = None;
    let mut data_lines: Vec<&str> = Vec::new();

    for line in block.lines() {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => data_lines.push(value),
            "event" => event_type = Some(value.to_string()),
            "id" => id = Some(value.to_string()),
            _ => {}
        }
    }

    if data_lines.is_empty() {
        return None;
    }

    Some(SseEvent {
        event_type,
        data: data_lines.join("\n"),
        id,
    })
}

/// Transport errors from the body pass through as their own [`CallError`]
/// variant, e.g. `reqwest::Error` becomes [`CallError::Http`].
impl<S, E> Stream for SseStream<S>
where
    S: Stream<Item = Result<bytes::Bytes, E>> + Unpin,
    E: Into<CallError>,
{
    type Item = Result<SseEvent, CallError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(item) = self.ready.pop_front() {
                return Poll::Ready(Some(item));
            }
            if self.finished {
                return Poll::Ready(None);
            }

            match ready!(self.inner.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => {
                    self.push_bytes(&chunk);
                    self.drain_complete_events();
                    if !self.finished && self.buffer.len() > MAX_BUFFER_BYTES {
                        self.fail(CallError::stream("SSE buffer exceeded maximum size"));
                    }
                }
                Some(Err(e)) => self.fail(e.into()),
                None => {
                    self.finished = true;
                    self.drain_trailing_event();
                }
            }
        }
    }
}

/// Extension trait adding SSE decoding to byte streams.
pub trait SseStreamExt: Stream {
    fn sse_events(self) -> SseStream<Self>
    where
        Self: Sized,
    {
        SseStream::new(self)
    }
}

impl<S: Stream> SseStreamExt for S {}
