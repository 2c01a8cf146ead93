use super::backend::{FragmentStream, GeminiBackend, GenerationBackend};
use super::error::GenerationError;
use crate::config::{CredentialSource, RpmConfig};
use crate::gemini::{GenerateContentRequest, GenerationSettings};
use crate::lesson::LessonPlanRequest;
use crate::prompts::PromptBuilder;
use crate::render::clean_generated_html;
use std::sync::Arc;
use tracing::{debug, info};

/// Turns lesson-plan requests into generated documents.
///
/// The credential is resolved on every call so a fixed deployment is picked
/// up without a restart.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    credentials: CredentialSource,
    prompts: PromptBuilder,
    settings: Option<GenerationSettings>,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("backend", &self.backend.name())
            .field("model", &self.backend.model())
            .field("credentials", &self.credentials.describe())
            .finish()
    }
}

impl GenerationClient {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        credentials: CredentialSource,
        prompts: PromptBuilder,
    ) -> Self {
        Self {
            backend,
            credentials,
            prompts,
            settings: None,
        }
    }

    /// Gemini-backed client configured from `rpm.toml`
    pub fn from_config(config: &RpmConfig) -> Result<Self, GenerationError> {
        let backend = GeminiBackend::new(&config.generation)?;
        let client = Self::new(
            Arc::new(backend),
            CredentialSource::env(config.generation.api_key_env.clone()),
            PromptBuilder::new(config.school.clone()),
        );
        let generation = &config.generation;
        if generation.temperature.is_none() && generation.max_output_tokens.is_none() {
            return Ok(client);
        }
        Ok(client.with_settings(GenerationSettings {
            temperature: generation.temperature,
            max_output_tokens: generation.max_output_tokens,
        }))
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn credentials(&self) -> &CredentialSource {
        &self.credentials
    }

    pub fn prompts(&self) -> &PromptBuilder {
        &self.prompts
    }

    fn api_key(&self) -> Result<String, GenerationError> {
        self.credentials
            .resolve()
            .ok_or_else(|| GenerationError::configuration(self.credentials.describe()))
    }

    /// Wire request carrying the system instruction and the built prompt
    pub fn build_request(&self, request: &LessonPlanRequest) -> GenerateContentRequest {
        let wire = GenerateContentRequest::single_turn(
            self.prompts.system_instruction(),
            self.prompts.build(request),
        );
        match &self.settings {
            Some(settings) => wire.with_generation_config(settings.clone()),
            None => wire,
        }
    }

    /// Start generating; fragments arrive in order on the returned stream.
    ///
    /// A missing credential fails with [`GenerationError::Configuration`]
    /// before anything is sent.
    pub async fn generate_stream(
        &self,
        request: &LessonPlanRequest,
    ) -> Result<FragmentStream, GenerationError> {
        let api_key = self.api_key()?;
        let wire = self.build_request(request);
        let prompt_chars: usize = wire.contents.iter().map(|c| c.text().chars().count()).sum();
        info!(
            backend = self.backend.name(),
            model = self.backend.model(),
            prompt_chars,
            subject = %request.subject,
            meetings = request.meetings,
            "dispatching lesson-plan generation"
        );
        self.backend.stream(&api_key, wire).await
    }

    /// Generate the whole document at once, already cleaned
    pub async fn generate(&self, request: &LessonPlanRequest) -> Result<String, GenerationError> {
        let api_key = self.api_key()?;
        let wire = self.build_request(request);
        let raw = self.backend.generate(&api_key, wire).await?;
        debug!(bytes = raw.len(), "received generated document");
        Ok(clean_generated_html(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::{StreamExt, stream};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct ScriptedBackend {
        calls: AtomicUsize,
        fragments: Vec<&'static str>,
        seen: Mutex<Vec<(String, GenerateContentRequest)>>,
    }

    impl ScriptedBackend {
        fn with_fragments(fragments: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                fragments,
                ..Self::default()
            })
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "test-model"
        }

        async fn stream(
            &self,
            api_key: &str,
            request: GenerateContentRequest,
        ) -> Result<FragmentStream, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().push((api_key.to_string(), request));
            let items: Vec<Result<String, GenerationError>> =
                self.fragments.iter().map(|f| Ok(f.to_string())).collect();
            Ok(Box::pin(stream::iter(items)))
        }

        async fn generate(
            &self,
            _api_key: &str,
            _request: GenerateContentRequest,
        ) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.fragments.concat())
        }
    }

    fn client(backend: Arc<ScriptedBackend>, key: Option<&str>) -> GenerationClient {
        GenerationClient::new(
            backend,
            CredentialSource::Fixed(key.map(str::to_string)),
            PromptBuilder::default(),
        )
    }

    #[tokio::test]
    async fn missing_credential_fails_before_backend_call() {
        let backend = ScriptedBackend::with_fragments(vec!["<p>x</p>"]);
        for key in [None, Some(""), Some("   ")] {
            let result = client(backend.clone(), key)
                .generate_stream(&LessonPlanRequest::example())
                .await;
            match result {
                Err(error) => assert!(error.is_configuration()),
                Ok(_) => panic!("expected configuration error"),
            }
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn streams_fragments_in_order() {
        let backend = ScriptedBackend::with_fragments(vec!["<div>", "isi", "</div>"]);
        let stream = client(backend.clone(), Some(" key-123 "))
            .generate_stream(&LessonPlanRequest::example())
            .await
            .unwrap();
        let fragments: Vec<String> = stream.map(|f| f.unwrap()).collect().await;
        assert_eq!(fragments, vec!["<div>", "isi", "</div>"]);

        let seen = backend.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "key-123");
    }

    #[tokio::test]
    async fn request_carries_system_instruction_and_prompt() {
        let backend = ScriptedBackend::with_fragments(vec!["ok"]);
        let request = LessonPlanRequest::example();
        let _ = client(backend.clone(), Some("k"))
            .generate_stream(&request)
            .await
            .unwrap();

        let seen = backend.seen.lock();
        let wire = &seen[0].1;
        let instruction = wire
            .system_instruction
            .as_ref()
            .and_then(|si| si.parts[0].as_text())
            .unwrap_or_default();
        assert!(instruction.starts_with("Anda adalah asisten ahli"));
        assert_eq!(
            wire.contents[0].text(),
            crate::prompts::build_prompt(&request)
        );
    }

    #[tokio::test]
    async fn generate_returns_cleaned_document() {
        let backend = ScriptedBackend::with_fragments(vec!["```html\n", "<p>**Judul**</p>", "\n```"]);
        let html = client(backend, Some("k"))
            .generate(&LessonPlanRequest::example())
            .await
            .unwrap();
        assert_eq!(html, "<p><b>Judul</b></p>");
    }

    #[test]
    fn configured_sampling_reaches_the_wire_request() {
        let mut config = RpmConfig::default();
        config.generation.temperature = Some(0.4);
        config.generation.max_output_tokens = Some(8192);

        let wire = GenerationClient::from_config(&config)
            .unwrap()
            .build_request(&LessonPlanRequest::example());
        assert_eq!(
            wire.generation_config,
            Some(GenerationSettings {
                temperature: Some(0.4),
                max_output_tokens: Some(8192),
            })
        );
    }

    #[test]
    fn unset_sampling_leaves_service_defaults() {
        let wire = GenerationClient::from_config(&RpmConfig::default())
            .unwrap()
            .build_request(&LessonPlanRequest::example());
        assert!(wire.generation_config.is_none());
    }
}
