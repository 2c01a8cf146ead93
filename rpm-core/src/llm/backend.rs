use super::error::GenerationError;
use crate::config::GenerationConfig;
use crate::config::constants::models;
use crate::gemini::{Client, ClientConfig, GenerateContentRequest};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::Client as ReqwestClient;
use std::pin::Pin;
use tracing::warn;

/// Ordered, finite fragments of one generated document; consumed once
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, GenerationError>> + Send>>;

/// Service able to turn a prepared request into text
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Backend name used in logs
    fn name(&self) -> &str;

    /// Model identifier sent with every request
    fn model(&self) -> &str;

    /// Start a streaming call
    async fn stream(
        &self,
        api_key: &str,
        request: GenerateContentRequest,
    ) -> Result<FragmentStream, GenerationError>;

    /// One non-streaming call returning the whole text
    async fn generate(
        &self,
        api_key: &str,
        request: GenerateContentRequest,
    ) -> Result<String, GenerationError>;
}

/// Gemini REST backend sharing one connection pool across requests
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    http: ReqwestClient,
    config: ClientConfig,
    model: String,
}

impl GeminiBackend {
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        if !models::google::SUPPORTED_MODELS.contains(&config.model.as_str()) {
            warn!(model = %config.model, "model is not in the supported list, continuing anyway");
        }
        let client_config = ClientConfig::from(config);
        let http = client_config.build_http()?;
        Ok(Self {
            http,
            config: client_config,
            model: config.model.clone(),
        })
    }

    fn client(&self, api_key: &str) -> Client {
        Client::with_http(
            self.http.clone(),
            api_key.to_string(),
            self.model.clone(),
            self.config.clone(),
        )
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn stream(
        &self,
        api_key: &str,
        request: GenerateContentRequest,
    ) -> Result<FragmentStream, GenerationError> {
        let fragments = self.client(api_key).stream_fragments(&request).await?;
        Ok(Box::pin(
            fragments.map(|fragment| fragment.map_err(GenerationError::from)),
        ))
    }

    async fn generate(
        &self,
        api_key: &str,
        request: GenerateContentRequest,
    ) -> Result<String, GenerationError> {
        let response = self.client(api_key).generate(&request).await?;
        response
            .text()
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GenerationError::service("Respons layanan AI kosong."))
    }
}
