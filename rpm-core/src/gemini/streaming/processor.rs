//! Streaming processor for handling real-time responses from the Gemini API
//!
//! Parses the server-sent-event body of `streamGenerateContent`, calling a
//! callback for every text part as soon as its event is complete.

use crate::config::GenerationConfig;
use crate::gemini::models::Candidate;
use crate::gemini::streaming::{StreamingError, StreamingMetrics, StreamingResponse};
use futures::stream::{Stream, StreamExt};
use serde_json::Value;
use std::fmt::Display;
use std::time::Instant;
use tokio::time::{Duration, timeout};

/// Configuration for the streaming processor
#[derive(Debug, Clone)]
pub struct StreamingConfig {
    /// Timeout for reading each chunk after the first
    pub chunk_timeout: Duration,
    /// Maximum time to wait for the first chunk
    pub first_chunk_timeout: Duration,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for StreamingConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            chunk_timeout: config.chunk_timeout(),
            first_chunk_timeout: config.first_chunk_timeout(),
        }
    }
}

/// Streaming processor for handling real-time responses from the Gemini API
pub struct StreamingProcessor {
    config: StreamingConfig,
    metrics: StreamingMetrics,
    current_event_data: String,
    response: StreamingResponse,
    has_valid_content: bool,
}

impl StreamingProcessor {
    pub fn new() -> Self {
        Self::with_config(StreamingConfig::default())
    }

    pub fn with_config(config: StreamingConfig) -> Self {
        Self {
            config,
            metrics: StreamingMetrics::default(),
            current_event_data: String::new(),
            response: StreamingResponse::default(),
            has_valid_content: false,
        }
    }

    /// Process a streaming body, calling `on_chunk` for each text part in order.
    ///
    /// Lines are split on raw bytes before decoding so multi-byte characters
    /// spanning two network chunks arrive intact.
    pub async fn process_stream<S, B, E, F>(
        &mut self,
        mut stream: S,
        mut on_chunk: F,
    ) -> Result<StreamingResponse, StreamingError>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: Display,
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        self.metrics = StreamingMetrics {
            request_start_time: Some(Instant::now()),
            ..StreamingMetrics::default()
        };
        self.current_event_data.clear();
        self.response = StreamingResponse::default();
        self.has_valid_content = false;

        let mut buffer: Vec<u8> = Vec::new();
        let mut received_any = false;

        loop {
            let (operation, wait) = if received_any {
                ("chunk", self.config.chunk_timeout)
            } else {
                ("first_chunk", self.config.first_chunk_timeout)
            };

            let next = match timeout(wait, stream.next()).await {
                Ok(next) => next,
                Err(_) => {
                    return Err(StreamingError::TimeoutError {
                        operation: operation.to_string(),
                        duration: wait,
                    });
                }
            };

            match next {
                Some(Ok(bytes)) => {
                    let bytes = bytes.as_ref();
                    if !received_any {
                        self.metrics.first_chunk_time = Some(Instant::now());
                        received_any = true;
                    }
                    self.metrics.total_chunks += 1;
                    self.metrics.total_bytes += bytes.len();
                    buffer.extend_from_slice(bytes);
                    self.process_buffer(&mut buffer, &mut on_chunk)?;
                }
                Some(Err(e)) => {
                    return Err(StreamingError::NetworkError {
                        message: format!("Failed to read chunk: {e}"),
                    });
                }
                None => break,
            }
        }

        if !received_any {
            return Err(StreamingError::StreamingError {
                message: "Empty streaming response".to_string(),
                partial_content: None,
            });
        }

        self.process_remaining_buffer(&mut buffer, &mut on_chunk)?;

        if !self.has_valid_content {
            return Err(StreamingError::ContentError {
                message: "No valid content received from streaming API".to_string(),
            });
        }

        Ok(std::mem::take(&mut self.response))
    }

    /// Handle every complete line in the buffer, keeping the unfinished tail
    fn process_buffer<F>(&mut self, buffer: &mut Vec<u8>, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        while let Some(newline_pos) = buffer.iter().position(|byte| *byte == b'\n') {
            let line_bytes: Vec<u8> = buffer.drain(..=newline_pos).collect();
            let line = String::from_utf8_lossy(&line_bytes[..newline_pos]);
            self.handle_line(&line, on_chunk)?;
        }
        Ok(())
    }

    fn process_remaining_buffer<F>(
        &mut self,
        buffer: &mut Vec<u8>,
        on_chunk: &mut F,
    ) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        if !buffer.is_empty() {
            let remaining = String::from_utf8_lossy(buffer).into_owned();
            buffer.clear();
            let remaining_line = remaining.trim_end_matches('\r');
            if !remaining_line.trim().is_empty() {
                self.handle_line(remaining_line, on_chunk)?;
            }
        }

        self.finalize_current_event(on_chunk)
    }

    /// Handle a single SSE line
    fn handle_line<F>(&mut self, raw_line: &str, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        let line = raw_line.trim_end_matches('\r');

        if line.is_empty() {
            return self.finalize_current_event(on_chunk);
        }

        let trimmed = line.trim();

        if trimmed.is_empty()
            || trimmed.starts_with(':')
            || trimmed.starts_with("event:")
            || trimmed.starts_with("id:")
        {
            return Ok(());
        }

        if let Some(data_segment) = trimmed.strip_prefix("data:") {
            let data_segment = data_segment.trim_start();
            if data_segment == "[DONE]" {
                return self.finalize_current_event(on_chunk);
            }

            if !data_segment.is_empty() {
                if !self.current_event_data.is_empty() {
                    self.current_event_data.push('\n');
                }
                self.current_event_data.push_str(data_segment);
            }
            return Ok(());
        }

        // Plain JSON body (no `alt=sse`): one complete value per line
        if (trimmed.starts_with('{') || trimmed.starts_with('['))
            && self.current_event_data.is_empty()
        {
            if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                return self.process_event_value(value, on_chunk);
            }
        }

        if !self.current_event_data.is_empty() {
            self.current_event_data.push('\n');
        }
        self.current_event_data.push_str(trimmed);

        Ok(())
    }

    fn finalize_current_event<F>(&mut self, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        if self.current_event_data.trim().is_empty() {
            self.current_event_data.clear();
            return Ok(());
        }

        let event_data = std::mem::take(&mut self.current_event_data);
        // A JSON-array body spans several lines; parse its elements as one array
        let trimmed = event_data
            .trim()
            .trim_start_matches(['[', ','])
            .trim_end_matches([']', ','])
            .trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let parsed: Value = serde_json::from_str(&format!("[{trimmed}]")).map_err(|parse_err| {
            StreamingError::ParseError {
                message: format!("Failed to parse streaming JSON: {parse_err}"),
                raw_response: trimmed.to_string(),
            }
        })?;

        self.process_event_value(parsed, on_chunk)
    }

    fn process_event_value<F>(&mut self, value: Value, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.process_event_value(item, on_chunk)?;
                }
                Ok(())
            }
            Value::Object(map) => {
                if let Some(error_value) = map.get("error") {
                    let message = error_value
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("Gemini streaming error")
                        .to_string();
                    let status_code = error_value
                        .get("code")
                        .and_then(Value::as_u64)
                        .and_then(|code| u16::try_from(code).ok())
                        .unwrap_or(500);
                    return Err(StreamingError::ApiError {
                        status_code,
                        message,
                    });
                }

                if let Some(usage) = map.get("usageMetadata") {
                    self.response.usage_metadata = Some(usage.clone());
                }

                if let Some(candidates_value) = map.get("candidates") {
                    let candidate_values = match candidates_value {
                        Value::Array(items) => items.clone(),
                        Value::Object(_) => vec![candidates_value.clone()],
                        _ => Vec::new(),
                    };

                    for candidate_value in candidate_values {
                        let candidate: Candidate = serde_json::from_value(candidate_value.clone())
                            .map_err(|err| StreamingError::ParseError {
                                message: format!("Failed to parse candidate: {err}"),
                                raw_response: candidate_value.to_string(),
                            })?;
                        self.process_candidate(candidate, on_chunk)?;
                    }
                }

                if let Some(text) = map.get("text").and_then(Value::as_str) {
                    self.emit(text, on_chunk)?;
                }

                Ok(())
            }
            Value::String(text) => self.emit(&text, on_chunk),
            _ => Ok(()),
        }
    }

    fn process_candidate<F>(&mut self, candidate: Candidate, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        for part in &candidate.content.parts {
            if let Some(text) = part.as_text() {
                self.emit(text, on_chunk)?;
            }
        }

        if candidate.finish_reason.is_some() {
            self.response.finish_reason = candidate.finish_reason;
        }
        Ok(())
    }

    /// Forward one text fragment. Whitespace-only fragments are forwarded too
    /// since they are part of the document.
    fn emit<F>(&mut self, text: &str, on_chunk: &mut F) -> Result<(), StreamingError>
    where
        F: FnMut(&str) -> Result<(), StreamingError>,
    {
        if text.is_empty() {
            return Ok(());
        }
        on_chunk(text)?;
        self.response.text.push_str(text);
        self.metrics.total_fragments += 1;
        self.has_valid_content = true;
        Ok(())
    }

    /// Get current streaming metrics
    pub fn metrics(&self) -> &StreamingMetrics {
        &self.metrics
    }
}

impl Default for StreamingProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::io;

    type Chunk = Result<Vec<u8>, io::Error>;

    fn chunks(parts: &[&str]) -> stream::Iter<std::vec::IntoIter<Chunk>> {
        stream::iter(
            parts
                .iter()
                .map(|part| Ok(part.as_bytes().to_vec()))
                .collect::<Vec<Chunk>>(),
        )
    }

    fn event(text: &str) -> String {
        let body = serde_json::json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        });
        format!("data: {body}\r\n\r\n")
    }

    fn short_timeouts() -> StreamingConfig {
        StreamingConfig {
            chunk_timeout: Duration::from_millis(50),
            first_chunk_timeout: Duration::from_millis(50),
        }
    }

    #[tokio::test]
    async fn forwards_fragments_in_order() {
        let first = event("<div>");
        let second = event("Halo</div>");
        let mut seen = Vec::new();
        let mut processor = StreamingProcessor::new();

        let response = processor
            .process_stream(chunks(&[&first, &second]), |text| {
                seen.push(text.to_string());
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(seen, vec!["<div>", "Halo</div>"]);
        assert_eq!(response.text, "<div>Halo</div>");
        assert_eq!(processor.metrics().total_fragments, 2);
        assert_eq!(processor.metrics().total_chunks, 2);
        assert!(processor.metrics().time_to_first_chunk().is_some());
    }

    #[tokio::test]
    async fn reassembles_lines_split_inside_multibyte_characters() {
        let body = event("السَّلَامُ عَلَيْكُمْ");
        let bytes = body.as_bytes();
        // split inside the first Arabic code point
        let split = body.find('ا').unwrap_or(0) + 1;
        let parts: Vec<Chunk> = vec![Ok(bytes[..split].to_vec()), Ok(bytes[split..].to_vec())];

        let mut processor = StreamingProcessor::new();
        let response = processor
            .process_stream(stream::iter(parts), |_| Ok(()))
            .await
            .unwrap();

        assert_eq!(response.text, "السَّلَامُ عَلَيْكُمْ");
    }

    #[tokio::test]
    async fn whitespace_fragments_are_kept() {
        let parts = [event("<p>a</p>"), event("\n"), event("<p>b</p>")];
        let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
        let mut processor = StreamingProcessor::new();
        let response = processor
            .process_stream(chunks(&refs), |_| Ok(()))
            .await
            .unwrap();
        assert_eq!(response.text, "<p>a</p>\n<p>b</p>");
    }

    #[tokio::test]
    async fn records_finish_reason_and_usage() {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "selesai" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 42 }
        });
        let line = format!("data: {body}\n\n");
        let mut processor = StreamingProcessor::new();
        let response = processor
            .process_stream(chunks(&[&line]), |_| Ok(()))
            .await
            .unwrap();
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(response.usage_metadata.unwrap()["totalTokenCount"], 42);
    }

    #[tokio::test]
    async fn api_error_event_fails_the_stream() {
        let line = "data: {\"error\": {\"code\": 403, \"message\": \"API key not valid\"}}\n\n";
        let mut processor = StreamingProcessor::new();
        let err = processor
            .process_stream(chunks(&[line]), |_| Ok(()))
            .await
            .unwrap_err();
        match err {
            StreamingError::ApiError {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_body_is_an_error() {
        let mut processor = StreamingProcessor::new();
        let err = processor
            .process_stream(chunks(&[]), |_| Ok(()))
            .await
            .unwrap_err();
        assert!(matches!(err, StreamingError::StreamingError { .. }));

        let err = processor
            .process_stream(chunks(&[": keep-alive\n\n"]), |_| Ok(()))
            .await
            .unwrap_err();
        assert!(matches!(err, StreamingError::ContentError { .. }));
    }

    #[tokio::test]
    async fn callback_error_stops_processing() {
        let first = event("satu");
        let second = event("dua");
        let mut calls = 0;
        let mut processor = StreamingProcessor::new();
        let err = processor
            .process_stream(chunks(&[&first, &second]), |_| {
                calls += 1;
                Err(StreamingError::StreamingError {
                    message: "receiver dropped".into(),
                    partial_content: None,
                })
            })
            .await
            .unwrap_err();
        assert_eq!(calls, 1);
        assert!(matches!(err, StreamingError::StreamingError { .. }));
    }

    #[tokio::test]
    async fn first_chunk_timeout_is_reported() {
        let silent = Box::pin(stream::pending::<Chunk>());
        let mut processor = StreamingProcessor::with_config(short_timeouts());
        let err = processor.process_stream(silent, |_| Ok(())).await.unwrap_err();
        match err {
            StreamingError::TimeoutError { operation, .. } => assert_eq!(operation, "first_chunk"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn stalled_stream_times_out_after_partial_content() {
        let first = event("awal");
        let stalled = Box::pin(chunks(&[&first]).chain(stream::pending::<Chunk>()));
        let mut seen = String::new();
        let mut processor = StreamingProcessor::with_config(short_timeouts());
        let err = processor
            .process_stream(stalled, |text| {
                seen.push_str(text);
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(seen, "awal");
    }

    #[tokio::test]
    async fn plain_json_array_body_is_accepted() {
        let body = "[{\"candidates\": [{\"content\": {\"parts\": [{\"text\": \"a\"}]}}]}\n,\n{\"candidates\": [{\"content\": {\"parts\": [{\"text\": \"b\"}]}}]}]\n";
        let mut processor = StreamingProcessor::new();
        let response = processor
            .process_stream(chunks(&[body]), |_| Ok(()))
            .await
            .unwrap();
        assert_eq!(response.text, "ab");
    }
}
