//! API key retrieval for the Gemini generator.
//!
//! The credential is read from the process environment at call time so an
//! operator can fix a deployment without restarting the form. A `.env` file in
//! the working directory is loaded once at startup.

use std::env;
use tracing::{debug, warn};

/// Where the generation client looks for its credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Read the named environment variable on every call
    Env(String),
    /// Fixed value, used by tests and embedding applications
    Fixed(Option<String>),
}

impl CredentialSource {
    pub fn env(var: impl Into<String>) -> Self {
        Self::Env(var.into())
    }

    /// Name shown to the operator when the credential is missing
    pub fn describe(&self) -> &str {
        match self {
            Self::Env(var) => var,
            Self::Fixed(_) => "API_KEY",
        }
    }

    /// Resolve the credential. Missing and blank values both yield `None`.
    pub fn resolve(&self) -> Option<String> {
        let raw = match self {
            Self::Env(var) => env::var(var).ok(),
            Self::Fixed(value) => value.clone(),
        };
        raw.map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

/// Load environment variables from .env file
///
/// A missing file is fine; a malformed one is logged and ignored.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded environment variables from .env");
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            warn!(error = %e, "failed to load .env file");
        }
    }
}
