//! # rpm-core
//!
//! Core of the RPM (Rencana Pembelajaran Mendalam) lesson-plan generator.
//! A teacher fills in a form, the form becomes one long prompt, Gemini
//! streams an HTML document back, and the result is cleaned for display,
//! printing and export.
//!
//! ## Modules
//!
//! - `lesson/`: the form's input model, choice catalogs and validation.
//! - `prompts/`: deterministic prompt construction and the system instruction.
//! - `gemini/`: REST client and server-sent-event processor for Gemini.
//! - `llm/`: generation client with credential checks and backend trait.
//! - `render/`: cleanup of raw generator output.
//! - `export/`: Word and clipboard exports.
//! - `session/`: form/result state machine and the task that drives it.
//! - `config/`: `rpm.toml` loading, defaults and constants.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use rpm_core::{ConfigManager, GenerationClient, LessonPlanRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigManager::load()?.into_config();
//!     let client = GenerationClient::from_config(&config)?;
//!     let html = client.generate(&LessonPlanRequest::example()).await?;
//!     println!("{html}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod export;
pub mod gemini;
pub mod lesson;
pub mod llm;
pub mod prompts;
pub mod render;
pub mod session;

pub use config::{ConfigManager, CredentialSource, RpmConfig};
pub use lesson::{LessonPlanRequest, ValidationErrors};
pub use llm::{FragmentStream, GenerationBackend, GenerationClient, GenerationError};
pub use prompts::{PromptBuilder, build_prompt};
pub use render::clean_generated_html;
pub use session::{FormSession, GenerationRunner, Phase, RequestId, UiState};
