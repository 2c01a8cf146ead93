pub mod errors;
pub mod processor;

pub use errors::StreamingError;
pub use processor::{StreamingConfig, StreamingProcessor};

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Streaming metrics for monitoring and debugging
#[derive(Debug, Clone, Default)]
pub struct StreamingMetrics {
    pub request_start_time: Option<Instant>,
    pub first_chunk_time: Option<Instant>,
    pub total_chunks: usize,
    pub total_bytes: usize,
    pub total_fragments: usize,
}

impl StreamingMetrics {
    /// Time between the request going out and the first body bytes
    pub fn time_to_first_chunk(&self) -> Option<Duration> {
        match (self.request_start_time, self.first_chunk_time) {
            (Some(start), Some(first)) => Some(first.saturating_duration_since(start)),
            _ => None,
        }
    }
}

/// Everything received over one streaming call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingResponse {
    pub text: String,
    pub finish_reason: Option<String>,
    pub usage_metadata: Option<serde_json::Value>,
}
