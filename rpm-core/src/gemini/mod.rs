//! Gemini API client
//!
//! HTTP client configuration, the wire models for `generateContent`, and the
//! server-sent-event processor used for streaming.

pub mod client;
pub mod models;
pub mod streaming;

pub use client::{Client, ClientConfig, FragmentReceiver};
pub use models::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationSettings, Part,
    SystemInstruction,
};
pub use streaming::{
    StreamingConfig, StreamingError, StreamingMetrics, StreamingProcessor, StreamingResponse,
};
