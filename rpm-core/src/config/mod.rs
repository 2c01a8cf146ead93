//! RPM generator configuration module
//!
//! Handles loading `rpm.toml`, the section defaults, and retrieval of the API
//! credential from the environment.

pub mod api_keys;
pub mod constants;
pub mod core;
pub mod loader;

pub use api_keys::{CredentialSource, load_dotenv};
pub use core::{GenerationConfig, ProgressConfig, SchoolProfile, ServerConfig};
pub use loader::{ConfigManager, RpmConfig};
