pub mod config;

pub use config::ClientConfig;

use crate::gemini::models::{GenerateContentRequest, GenerateContentResponse};
use crate::gemini::streaming::{StreamingError, StreamingProcessor};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, Url};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Ordered text fragments of one streaming call, consumed once
pub type FragmentReceiver = UnboundedReceiverStream<Result<String, StreamingError>>;

#[derive(Clone)]
pub struct Client {
    api_key: String,
    model: String,
    http: ReqwestClient,
    config: ClientConfig,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("model", &self.model)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client on top of an existing connection pool
    pub fn with_http(
        http: ReqwestClient,
        api_key: String,
        model: String,
        config: ClientConfig,
    ) -> Self {
        Self {
            api_key,
            model,
            http,
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self, method: &str, streaming: bool) -> Result<Url, StreamingError> {
        let raw = format!("{}/models/{}:{method}", self.config.base_url, self.model);
        let mut url = Url::parse(&raw).map_err(|e| StreamingError::NetworkError {
            message: format!("Invalid endpoint {raw}: {e}"),
        })?;
        if streaming {
            url.query_pairs_mut().append_pair("alt", "sse");
        }
        Ok(url)
    }

    fn post(&self, url: Url, request: &GenerateContentRequest) -> RequestBuilder {
        self.http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
    }

    /// Generate content with the Gemini API
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, StreamingError> {
        let start_time = Instant::now();
        let url = self.endpoint("generateContent", false)?;
        debug!(model = %self.model, "sending generateContent request");

        let response = self
            .post(url, request)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e, "request"))?;
        let response = Self::check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| self.classify_send_error(e, "request"))?;
        let response_data: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| StreamingError::ParseError {
                message: format!("Failed to parse response: {e}"),
                raw_response: body.clone(),
            })?;

        info!(
            model = %self.model,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "generateContent completed"
        );

        Ok(response_data)
    }

    /// Start a streaming generation.
    ///
    /// The HTTP status is checked before returning, so rejected credentials and
    /// quota errors surface here. The body is then parsed on a spawned task
    /// and every text fragment is forwarded, in order, through the returned
    /// stream. The stream ends after the last fragment or after the first
    /// error.
    pub async fn stream_fragments(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<FragmentReceiver, StreamingError> {
        let url = self.endpoint("streamGenerateContent", true)?;
        let first_chunk_timeout = self.config.streaming.first_chunk_timeout;
        debug!(model = %self.model, "sending streamGenerateContent request");

        let response = match timeout(first_chunk_timeout, self.post(url, request).send()).await {
            Ok(sent) => sent.map_err(|e| self.classify_send_error(e, "request"))?,
            Err(_) => {
                return Err(StreamingError::TimeoutError {
                    operation: "request".to_string(),
                    duration: first_chunk_timeout,
                });
            }
        };
        let response = Self::check_status(response).await?;

        let (tx, rx) = mpsc::unbounded_channel();
        let streaming_config = self.config.streaming.clone();
        let model = self.model.clone();

        tokio::spawn(async move {
            let start_time = Instant::now();
            let mut processor = StreamingProcessor::with_config(streaming_config);
            let body = Box::pin(response.bytes_stream());
            let watcher = tx.clone();
            let result = tokio::select! {
                result = processor.process_stream(body, |text| {
                    tx.send(Ok(text.to_string()))
                        .map_err(|_| StreamingError::StreamingError {
                            message: "fragment receiver dropped".to_string(),
                            partial_content: None,
                        })
                }) => result,
                // Dropping the body here closes the connection
                () = watcher.closed() => {
                    debug!(model = %model, "fragment receiver dropped, abandoning stream");
                    return;
                }
            };

            let metrics = processor.metrics();
            match result {
                Ok(summary) => info!(
                    model = %model,
                    fragments = metrics.total_fragments,
                    bytes = metrics.total_bytes,
                    first_chunk_ms = metrics
                        .time_to_first_chunk()
                        .map(|elapsed| elapsed.as_millis() as u64),
                    finish_reason = summary.finish_reason.as_deref().unwrap_or("unknown"),
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "stream completed"
                ),
                Err(error) => {
                    warn!(model = %model, error = %error, "stream ended with error");
                    // Receiver may already be gone; nothing else to notify
                    let _ = tx.send(Err(error));
                }
            }
        });

        Ok(UnboundedReceiverStream::new(rx))
    }

    fn classify_send_error(&self, error: reqwest::Error, operation: &str) -> StreamingError {
        if error.is_timeout() {
            let duration = if error.is_connect() {
                self.config.connect_timeout
            } else {
                self.config.request_timeout
            };
            return StreamingError::TimeoutError {
                operation: operation.to_string(),
                duration,
            };
        }
        StreamingError::from(error)
    }

    async fn check_status(response: Response) -> Result<Response, StreamingError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&error_text)
            .ok()
            .and_then(|value| {
                value
                    .pointer("/error/message")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or(error_text);

        Err(StreamingError::ApiError {
            status_code: status.as_u16(),
            message,
        })
    }
}
