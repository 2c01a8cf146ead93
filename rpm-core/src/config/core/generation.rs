use crate::config::constants::{env, models, timeouts, urls};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the call to the generative-language service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Gemini model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API credential. The key itself never
    /// lives in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the Gemini REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// TCP connect timeout
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Maximum wait for the first streamed fragment
    #[serde(default = "default_first_chunk_timeout")]
    pub first_chunk_timeout_secs: u64,

    /// Maximum wait between two streamed fragments
    #[serde(default = "default_chunk_timeout")]
    pub chunk_timeout_secs: u64,

    /// Whole-request limit for the non-streaming call
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Sampling temperature; the service default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Upper bound on generated tokens; the service default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            first_chunk_timeout_secs: default_first_chunk_timeout(),
            chunk_timeout_secs: default_chunk_timeout(),
            request_timeout_secs: default_request_timeout(),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

impl GenerationConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn first_chunk_timeout(&self) -> Duration {
        Duration::from_secs(self.first_chunk_timeout_secs)
    }

    pub fn chunk_timeout(&self) -> Duration {
        Duration::from_secs(self.chunk_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_model() -> String {
    models::google::DEFAULT_MODEL.to_string()
}
fn default_api_key_env() -> String {
    env::API_KEY.to_string()
}
fn default_base_url() -> String {
    urls::GEMINI_API_BASE.to_string()
}
fn default_connect_timeout() -> u64 {
    timeouts::CONNECT_SECS
}
fn default_first_chunk_timeout() -> u64 {
    timeouts::FIRST_CHUNK_SECS
}
fn default_chunk_timeout() -> u64 {
    timeouts::CHUNK_SECS
}
fn default_request_timeout() -> u64 {
    timeouts::REQUEST_SECS
}
