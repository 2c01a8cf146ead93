use crate::config::GenerationConfig;
use crate::gemini::streaming::{StreamingConfig, StreamingError};
use reqwest::Client as ReqwestClient;
use std::time::Duration;

/// HTTP and timeout settings for the Gemini client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, without trailing slash
    pub base_url: String,
    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,
    /// How long to keep idle connections alive
    pub pool_idle_timeout: Duration,
    /// TCP keepalive duration
    pub tcp_keepalive: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Whole-request limit for non-streaming calls
    pub request_timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// First-chunk and inter-chunk limits for streaming calls
    pub streaming: StreamingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for ClientConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            pool_max_idle_per_host: 4,
            pool_idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Duration::from_secs(60),
            connect_timeout: config.connect_timeout(),
            request_timeout: config.request_timeout(),
            user_agent: format!("rpm-generator/{}", env!("CARGO_PKG_VERSION")),
            streaming: StreamingConfig::from(config),
        }
    }
}

impl ClientConfig {
    /// Build the pooled HTTP client.
    ///
    /// No overall timeout is set; streaming calls are bounded by the chunk
    /// timeouts and `generate` applies `request_timeout` per request.
    pub fn build_http(&self) -> Result<ReqwestClient, StreamingError> {
        ReqwestClient::builder()
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(self.pool_idle_timeout)
            .tcp_keepalive(self.tcp_keepalive)
            .connect_timeout(self.connect_timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| StreamingError::NetworkError {
                message: format!("Failed to build HTTP client: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_generation_settings() {
        let generation = GenerationConfig {
            base_url: "http://localhost:9000/v1beta/".into(),
            connect_timeout_secs: 3,
            first_chunk_timeout_secs: 20,
            chunk_timeout_secs: 7,
            ..GenerationConfig::default()
        };
        let config = ClientConfig::from(&generation);
        assert_eq!(config.base_url, "http://localhost:9000/v1beta");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.streaming.first_chunk_timeout, Duration::from_secs(20));
        assert_eq!(config.streaming.chunk_timeout, Duration::from_secs(7));
    }
}
