use super::{FormSession, RequestId, UiState};
use crate::lesson::{LessonPlanRequest, ValidationErrors};
use crate::llm::GenerationClient;
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

pub type SharedSession = Arc<Mutex<FormSession>>;

/// Receives a snapshot after every applied state change
pub trait StatePublisher: Send + Sync {
    fn publish(&self, state: UiState);
}

impl StatePublisher for watch::Sender<UiState> {
    fn publish(&self, state: UiState) {
        self.send_replace(state);
    }
}

/// Drives one submission from the generation client into the session
#[derive(Clone)]
pub struct GenerationRunner {
    session: SharedSession,
    client: GenerationClient,
    publisher: Arc<dyn StatePublisher>,
}

impl GenerationRunner {
    pub fn new(
        session: SharedSession,
        client: GenerationClient,
        publisher: Arc<dyn StatePublisher>,
    ) -> Self {
        Self {
            session,
            client,
            publisher,
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Apply a state change and publish the result if it was accepted
    pub fn update<F>(&self, change: F) -> bool
    where
        F: FnOnce(&mut FormSession) -> bool,
    {
        let snapshot = {
            let mut session = self.session.lock();
            if !change(&mut session) {
                return false;
            }
            session.snapshot()
        };
        self.publisher.publish(snapshot);
        true
    }

    fn clear_delay(&self) -> Duration {
        self.session.lock().progress_config().clear_delay()
    }

    /// Validate and accept a submission, publishing the reset state
    pub fn submit(&self, request: LessonPlanRequest) -> Result<RequestId, ValidationErrors> {
        let (result, snapshot) = {
            let mut session = self.session.lock();
            let result = session.submit(request);
            (result, session.snapshot())
        };
        self.publisher.publish(snapshot);
        result
    }

    /// Consume the generation for `id` until it completes, fails, or is
    /// superseded by a newer submission.
    pub async fn run(&self, id: RequestId, request: LessonPlanRequest) {
        let mut fragments = match self.client.generate_stream(&request).await {
            Ok(stream) => stream,
            Err(error) => {
                warn!(request_id = %id, error = %error, "generation could not start");
                self.update(|session| session.failed(id, &error));
                self.finish(id).await;
                return;
            }
        };

        if !self.update(|session| session.stream_started(id)) {
            return;
        }

        while let Some(fragment) = fragments.next().await {
            match fragment {
                Ok(text) => {
                    if !self.update(|session| session.fragment(id, &text)) {
                        info!(request_id = %id, "superseded, dropping remaining fragments");
                        return;
                    }
                }
                Err(error) => {
                    warn!(request_id = %id, error = %error, "generation failed mid-stream");
                    self.update(|session| session.failed(id, &error));
                    self.finish(id).await;
                    return;
                }
            }
        }

        if self.update(|session| session.completed(id)) {
            info!(request_id = %id, "lesson plan generated");
            self.finish(id).await;
        }
    }

    async fn finish(&self, id: RequestId) {
        tokio::time::sleep(self.clear_delay()).await;
        self.update(|session| session.clear_loading(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CredentialSource, ProgressConfig};
    use crate::gemini::GenerateContentRequest;
    use crate::llm::{FragmentStream, GenerationBackend, GenerationError};
    use crate::prompts::PromptBuilder;
    use crate::session::{ErrorKind, Phase};
    use async_trait::async_trait;
    use futures::stream;

    struct FixedBackend {
        items: Vec<Result<String, GenerationError>>,
    }

    #[async_trait]
    impl GenerationBackend for FixedBackend {
        fn name(&self) -> &str {
            "fixed"
        }

        fn model(&self) -> &str {
            "fixed-model"
        }

        async fn stream(
            &self,
            _api_key: &str,
            _request: GenerateContentRequest,
        ) -> Result<FragmentStream, GenerationError> {
            Ok(Box::pin(stream::iter(self.items.clone())))
        }

        async fn generate(
            &self,
            _api_key: &str,
            _request: GenerateContentRequest,
        ) -> Result<String, GenerationError> {
            Err(GenerationError::service("unused"))
        }
    }

    fn runner(
        items: Vec<Result<String, GenerationError>>,
        key: Option<&str>,
    ) -> (GenerationRunner, watch::Receiver<UiState>) {
        let progress = ProgressConfig {
            clear_delay_ms: 1,
            ..ProgressConfig::default()
        };
        let session = Arc::new(Mutex::new(FormSession::new(progress)));
        let client = GenerationClient::new(
            Arc::new(FixedBackend { items }),
            CredentialSource::Fixed(key.map(str::to_string)),
            PromptBuilder::default(),
        );
        let (tx, rx) = watch::channel(UiState::default());
        (GenerationRunner::new(session, client, Arc::new(tx)), rx)
    }

    #[tokio::test]
    async fn run_completes_and_publishes_final_state() {
        let (runner, rx) = runner(
            vec![Ok("<p>".into()), Ok("**isi**".into()), Ok("</p>".into())],
            Some("key"),
        );
        let id = runner.submit(LessonPlanRequest::example()).unwrap();
        runner.run(id, LessonPlanRequest::example()).await;

        let state = rx.borrow().clone();
        assert_eq!(state.phase, Phase::Complete);
        assert_eq!(state.document, "<p><b>isi</b></p>");
        assert_eq!(state.progress, 100.0);
        assert_eq!(state.fragments, 3);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn missing_key_ends_in_configuration_failure() {
        let (runner, rx) = runner(vec![Ok("<p>x</p>".into())], None);
        let id = runner.submit(LessonPlanRequest::example()).unwrap();
        runner.run(id, LessonPlanRequest::example()).await;

        let state = rx.borrow().clone();
        assert_eq!(state.phase, Phase::Failed);
        assert_eq!(state.error.map(|e| e.kind), Some(ErrorKind::Configuration));
        assert!(state.document.is_empty());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn mid_stream_error_discards_partial_document() {
        let (runner, rx) = runner(
            vec![
                Ok("<p>awal".into()),
                Err(GenerationError::service("API error (503): overloaded")),
            ],
            Some("key"),
        );
        let id = runner.submit(LessonPlanRequest::example()).unwrap();
        runner.run(id, LessonPlanRequest::example()).await;

        let state = rx.borrow().clone();
        assert_eq!(state.phase, Phase::Failed);
        assert!(state.document.is_empty());
        let error = state.error.unwrap_or_else(|| panic!("error expected"));
        assert_eq!(error.kind, ErrorKind::Generation);
        assert!(error.message.contains("overloaded"));
    }

    #[tokio::test]
    async fn superseded_run_leaves_newer_request_alone() {
        let (runner, rx) = runner(vec![Ok("<p>lama</p>".into())], Some("key"));
        let old = runner.submit(LessonPlanRequest::example()).unwrap();
        let new = runner.submit(LessonPlanRequest::example()).unwrap();
        runner.run(old, LessonPlanRequest::example()).await;

        let state = rx.borrow().clone();
        assert_eq!(state.request_id, Some(new));
        assert_eq!(state.phase, Phase::Submitting);
        assert!(state.document.is_empty());
    }
}
