//! Streaming relay: bridges a backend's event-stream body to caller frames.
//!
//! The backend speaks `data: <json>` framing terminated by a `data: [DONE]`
//! sentinel. The relay reads that body one line at a time, maps each line to
//! at most one [`StreamEvent`], and re-encodes events as caller-facing
//! `data: <json>\n\n` frames the moment they are produced, without batching,
//! so perceived latency tracks the backend's token cadence.
//!
//! Failure never breaks the outbound body: a backend that dies mid-stream
//! produces exactly one `{"error": ...}` frame and the stream ends. When the
//! caller disconnects instead, axum drops this stream, which drops the
//! backend response and closes its connection.

use std::fmt;
use std::io;
use std::time::Instant;

use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use serde_json::json;
use switchboard_core::StreamEvent;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// Parse one trimmed, non-empty line of backend output.
///
/// Returns `None` for everything that produces no event: lines without the
/// `data: ` prefix (keep-alives, comments), payloads that fail to parse as
/// JSON (malformed frames are tolerated, never fatal), and well-formed
/// deltas with no content (role-only or empty-string deltas).
pub fn parse_data_line(line: &str) -> Option<StreamEvent> {
    let payload = line.strip_prefix(DATA_PREFIX)?;
    if payload == DONE_SENTINEL {
        return Some(StreamEvent::Done);
    }
    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(payload) else {
        return None;
    };
    let content = parsed["choices"][0]["delta"]["content"]
        .as_str()
        .unwrap_or("");
    if content.is_empty() {
        None
    } else {
        Some(StreamEvent::Content(content.to_string()))
    }
}

/// Encode one event as a caller-facing frame.
pub fn encode_frame(event: &StreamEvent) -> Bytes {
    let body = match event {
        StreamEvent::Content(text) => json!({ "content": text }),
        StreamEvent::Done => json!({ "content": "", "done": true }),
        StreamEvent::Error(message) => json!({ "error": message }),
    };
    Bytes::from(format!("data: {body}\n\n"))
}

struct RelayState<E> {
    upstream: BoxStream<'static, Result<Bytes, E>>,
    buf: BytesMut,
    model: String,
    started: Instant,
    events: u64,
    upstream_done: bool,
    finished: bool,
}

impl<E> RelayState<E> {
    /// Map one raw line to an outbound frame, if it produces one.
    fn frame_for_line(&mut self, raw: &[u8]) -> Option<Bytes> {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match parse_data_line(line)? {
            StreamEvent::Done => {
                self.finished = true;
                log_finished(&self.model, self.events, self.started, "done");
                Some(encode_frame(&StreamEvent::Done))
            }
            event => {
                self.events += 1;
                Some(encode_frame(&event))
            }
        }
    }
}

/// Bridge a backend response body into caller frames.
///
/// Yields one frame per stream event. Terminates after the `[DONE]`
/// sentinel (done frame), after an upstream failure (single error frame),
/// or silently when the backend closes the stream without a sentinel. Bytes
/// arriving after the sentinel are dropped.
pub fn relay_frames<S, E>(upstream: S, model: String) -> impl Stream<Item = Result<Bytes, io::Error>>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    let state = RelayState {
        upstream: upstream.boxed(),
        buf: BytesMut::new(),
        model,
        started: Instant::now(),
        events: 0,
        upstream_done: false,
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        if state.finished {
            return None;
        }
        loop {
            // Drain complete buffered lines before polling for more bytes.
            if let Some(line_end) = find_newline(&state.buf) {
                let raw = state.buf.split_to(line_end);
                if let Some(frame) = state.frame_for_line(&raw) {
                    return Some((Ok(frame), state));
                }
                continue;
            }

            if state.upstream_done {
                // Flush a final line sent without a trailing newline.
                if !state.buf.is_empty() {
                    let raw = state.buf.split_off(0);
                    if let Some(frame) = state.frame_for_line(&raw) {
                        return Some((Ok(frame), state));
                    }
                }
                state.finished = true;
                log_finished(&state.model, state.events, state.started, "closed");
                return None;
            }

            match state.upstream.next().await {
                Some(Ok(chunk)) => state.buf.extend_from_slice(&chunk),
                Some(Err(error)) => {
                    state.finished = true;
                    tracing::warn!(model = %state.model, %error, "backend stream failed");
                    let frame = encode_frame(&StreamEvent::Error(error.to_string()));
                    return Some((Ok(frame), state));
                }
                None => state.upstream_done = true,
            }
        }
    })
}

fn find_newline(buf: &BytesMut) -> Option<usize> {
    buf.iter().position(|&b| b == b'\n').map(|pos| pos + 1)
}

fn log_finished(model: &str, events: u64, started: Instant, reason: &'static str) {
    tracing::debug!(
        model,
        events,
        elapsed_ms = started.elapsed().as_millis() as u64,
        reason,
        "stream finished"
    );
}
