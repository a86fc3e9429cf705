//! Streaming response handling
//!
//! The chat API streams newline-delimited JSON. HTTP chunk boundaries do not
//! have to line up with line boundaries, so a carry buffer holds any partial
//! trailing line between chunks.

use futures::stream::{self, StreamExt};
use reqwest::Response;
use serde::Deserialize;
use tracing::trace;

use crate::{
    error::InferenceError,
    ports::{StreamingChunk, StreamingResponse},
};

/// One NDJSON line of the chat stream
#[derive(Debug, Deserialize)]
struct StreamLine {
    model: String,
    message: StreamMessage,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct StreamMessage {
    content: String,
}

/// Turn an HTTP response body into a stream of parsed chunks
pub fn create_stream(response: Response) -> StreamingResponse {
    let byte_stream = response.bytes_stream();

    let chunk_stream = byte_stream
        .scan(Vec::new(), |carry, result| {
            let items = match result {
                Ok(bytes) => {
                    carry.extend_from_slice(&bytes);
                    drain_lines(carry)
                },
                Err(e) => vec![Err(InferenceError::StreamError(e.to_string()))],
            };
            futures::future::ready(Some(items))
        })
        .flat_map(stream::iter);

    Box::pin(chunk_stream)
}

/// Split complete lines out of the carry buffer and parse each one.
/// Bytes after the last newline stay in the buffer for the next chunk.
fn drain_lines(carry: &mut Vec<u8>) -> Vec<Result<StreamingChunk, InferenceError>> {
    let mut items = Vec::new();

    while let Some(pos) = carry.iter().position(|&b| b == b'\n') {
        let line: Vec<u8> = carry.drain(..=pos).collect();
        let line = &line[..line.len() - 1]; // strip the newline
        if line.is_empty() {
            continue;
        }
        items.push(parse_line(line));
    }

    items
}

fn parse_line(line: &[u8]) -> Result<StreamingChunk, InferenceError> {
    let text = std::str::from_utf8(line)
        .map_err(|e| InferenceError::InvalidResponse(format!("Invalid UTF-8: {e}")))?;

    trace!(line = %text, "Parsing stream line");

    let parsed: StreamLine = serde_json::from_str(text)
        .map_err(|e| InferenceError::InvalidResponse(format!("JSON parse error: {e}")))?;

    Ok(StreamingChunk {
        content: parsed.message.content,
        done: parsed.done,
        model: if parsed.done { Some(parsed.model) } else { None },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain_str(carry: &mut Vec<u8>, input: &str) -> Vec<Result<StreamingChunk, InferenceError>> {
        carry.extend_from_slice(input.as_bytes());
        drain_lines(carry)
    }

    #[test]
    fn parses_single_line() {
        let mut carry = Vec::new();
        let chunks = drain_str(
            &mut carry,
            "{\"model\":\"llama3.1:8b\",\"message\":{\"content\":\"Hello\"},\"done\":false}\n",
        );

        assert_eq!(chunks.len(), 1);
        let chunk = chunks[0].as_ref().unwrap();
        assert_eq!(chunk.content, "Hello");
        assert!(!chunk.done);
        assert!(chunk.model.is_none());
    }

    #[test]
    fn parses_multiple_lines_in_one_chunk() {
        let mut carry = Vec::new();
        let input = concat!(
            "{\"model\":\"m\",\"message\":{\"content\":\"Hello\"},\"done\":false}\n",
            "{\"model\":\"m\",\"message\":{\"content\":\" world\"},\"done\":false}\n",
            "{\"model\":\"m\",\"message\":{\"content\":\"!\"},\"done\":true}\n",
        );
        let chunks = drain_str(&mut carry, input);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].as_ref().unwrap().content, "Hello");
        assert_eq!(chunks[1].as_ref().unwrap().content, " world");
        assert!(chunks[2].as_ref().unwrap().done);
    }

    #[test]
    fn final_line_carries_model_name() {
        let mut carry = Vec::new();
        let chunks = drain_str(
            &mut carry,
            "{\"model\":\"llama3.1:8b\",\"message\":{\"content\":\"\"},\"done\":true}\n",
        );

        let chunk = chunks[0].as_ref().unwrap();
        assert!(chunk.done);
        assert_eq!(chunk.model.as_deref(), Some("llama3.1:8b"));
    }

    #[test]
    fn partial_line_waits_for_next_chunk() {
        let mut carry = Vec::new();
        let first = drain_str(
            &mut carry,
            "{\"model\":\"m\",\"message\":{\"con",
        );
        assert!(first.is_empty());
        assert!(!carry.is_empty());

        let second = drain_str(&mut carry, "tent\":\"Hi\"},\"done\":false}\n");
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].as_ref().unwrap().content, "Hi");
        assert!(carry.is_empty());
    }

    #[test]
    fn empty_lines_are_skipped() {
        let mut carry = Vec::new();
        let input = concat!(
            "{\"model\":\"m\",\"message\":{\"content\":\"Hi\"},\"done\":false}\n",
            "\n",
            "{\"model\":\"m\",\"message\":{\"content\":\"!\"},\"done\":true}\n",
        );
        let chunks = drain_str(&mut carry, input);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn invalid_json_yields_error_item() {
        let mut carry = Vec::new();
        let chunks = drain_str(&mut carry, "not valid json\n");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_err());
    }

    #[test]
    fn invalid_utf8_yields_error_item() {
        let mut carry = vec![0xff, 0xfe, b'\n'];
        let chunks = drain_lines(&mut carry);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_err());
    }

    #[test]
    fn error_line_does_not_poison_following_lines() {
        let mut carry = Vec::new();
        let input = concat!(
            "garbage\n",
            "{\"model\":\"m\",\"message\":{\"content\":\"ok\"},\"done\":true}\n",
        );
        let chunks = drain_str(&mut carry, input);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].is_err());
        assert_eq!(chunks[1].as_ref().unwrap().content, "ok");
    }

    #[test]
    fn empty_input_yields_nothing() {
        let mut carry = Vec::new();
        assert!(drain_lines(&mut carry).is_empty());
    }
}
