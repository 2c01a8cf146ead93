//! Generation client: credential check, prompt assembly and the backend call

pub mod backend;
pub mod client;
pub mod error;

pub use backend::{FragmentStream, GeminiBackend, GenerationBackend};
pub use client::GenerationClient;
pub use error::GenerationError;
