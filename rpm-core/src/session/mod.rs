//! Form/result state machine behind the browser UI.
//!
//! `Editing → Submitting → Streaming → Complete | Failed`, and back to
//! `Editing`. Every event carries the [`RequestId`] handed out by
//! [`FormSession::submit`]; events from a superseded request are ignored.

pub mod progress;
pub mod runner;

pub use progress::ProgressTracker;
pub use runner::{GenerationRunner, SharedSession, StatePublisher};

use crate::config::ProgressConfig;
use crate::lesson::{FieldError, LessonPlanRequest, ValidationErrors};
use crate::llm::GenerationError;
use crate::render::clean_generated_html;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifier of one submission, increasing monotonically per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Editing,
    Submitting,
    Streaming,
    Complete,
    Failed,
}

impl Phase {
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Submitting | Self::Streaming)
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Form,
    Result,
}

/// Which error panel the UI shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Deployment is missing its credential; retrying alone will not help
    Configuration,
    Generation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiError {
    pub kind: ErrorKind,
    pub title: String,
    pub message: String,
}

impl From<&GenerationError> for UiError {
    fn from(error: &GenerationError) -> Self {
        let (kind, title) = if error.is_configuration() {
            (ErrorKind::Configuration, "Konfigurasi Dibutuhkan")
        } else {
            (ErrorKind::Generation, "Terjadi Kesalahan")
        };
        Self {
            kind,
            title: title.to_string(),
            message: error.to_string(),
        }
    }
}

/// Snapshot rendered by the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub phase: Phase,
    pub view: View,
    pub request_id: Option<RequestId>,
    pub loading: bool,
    pub progress: f64,
    pub fragments: usize,
    pub message_index: usize,
    pub status_message: String,
    pub spinner_color: String,
    pub document: String,
    pub error: Option<UiError>,
    pub field_errors: Vec<FieldError>,
}

impl Default for UiState {
    fn default() -> Self {
        let tracker = ProgressTracker::default();
        Self {
            phase: Phase::Editing,
            view: View::Form,
            request_id: None,
            loading: false,
            progress: 0.0,
            fragments: 0,
            message_index: 0,
            status_message: tracker.status_message().to_string(),
            spinner_color: tracker.spinner_color().to_string(),
            document: String::new(),
            error: None,
            field_errors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormSession {
    state: UiState,
    tracker: ProgressTracker,
    next_id: u64,
    submitted: Option<LessonPlanRequest>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(ProgressConfig::default())
    }
}

impl FormSession {
    pub fn new(progress: ProgressConfig) -> Self {
        Self {
            state: UiState::default(),
            tracker: ProgressTracker::new(progress),
            next_id: 0,
            submitted: None,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn snapshot(&self) -> UiState {
        self.state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn progress_config(&self) -> &ProgressConfig {
        self.tracker.config()
    }

    /// Request behind the current result, used for export filenames
    pub fn submitted_request(&self) -> Option<&LessonPlanRequest> {
        self.submitted.as_ref()
    }

    /// Finished, cleaned document of the latest successful request
    pub fn completed_document(&self) -> Option<&str> {
        (self.state.phase == Phase::Complete).then_some(self.state.document.as_str())
    }

    fn is_current(&self, id: RequestId) -> bool {
        let current = self.state.request_id == Some(id);
        if !current {
            debug!(request_id = %id, active = ?self.state.request_id, "ignoring stale event");
        }
        current
    }

    fn sync_progress(&mut self) {
        self.state.progress = self.tracker.value();
        self.state.fragments = self.tracker.fragments();
        self.state.message_index = self.tracker.message_index();
        self.state.status_message = self.tracker.status_message().to_string();
        self.state.spinner_color = self.tracker.spinner_color().to_string();
    }

    /// Validate and accept a submission.
    ///
    /// On failure nothing is dispatched and the field errors are shown on the
    /// form; a result view in progress is left untouched. On
    /// success the result view is reset and any in-flight request is
    /// superseded.
    pub fn submit(&mut self, request: LessonPlanRequest) -> Result<RequestId, ValidationErrors> {
        if let Err(errors) = request.validate() {
            if self.state.phase == Phase::Editing {
                self.state.field_errors = errors.errors.clone();
            }
            return Err(errors);
        }

        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.tracker.reset();
        self.state = UiState {
            phase: Phase::Submitting,
            view: View::Result,
            request_id: Some(id),
            loading: true,
            ..UiState::default()
        };
        self.sync_progress();
        self.submitted = Some(request);
        Ok(id)
    }

    /// The generator accepted the call and fragments will follow
    pub fn stream_started(&mut self, id: RequestId) -> bool {
        if !self.is_current(id) || self.state.phase != Phase::Submitting {
            return false;
        }
        self.state.phase = Phase::Streaming;
        self.tracker.start();
        self.sync_progress();
        true
    }

    pub fn fragment(&mut self, id: RequestId, text: &str) -> bool {
        if !self.is_current(id) || !self.state.phase.is_in_flight() {
            return false;
        }
        if self.state.phase == Phase::Submitting {
            self.state.phase = Phase::Streaming;
            self.tracker.start();
        }
        self.state.document.push_str(text);
        self.tracker.on_fragment();
        self.sync_progress();
        true
    }

    /// Stream exhausted: clean the document and snap progress to 100.
    /// The loading indicator stays until [`Self::clear_loading`].
    pub fn completed(&mut self, id: RequestId) -> bool {
        if !self.is_current(id) || !self.state.phase.is_in_flight() {
            return false;
        }
        self.state.document = clean_generated_html(&self.state.document);
        self.state.phase = Phase::Complete;
        self.tracker.complete();
        self.sync_progress();
        true
    }

    /// Any failure discards the partial document
    pub fn failed(&mut self, id: RequestId, error: &GenerationError) -> bool {
        if !self.is_current(id) || !self.state.phase.is_in_flight() {
            return false;
        }
        self.state.document.clear();
        self.state.phase = Phase::Failed;
        self.state.error = Some(UiError::from(error));
        self.tracker.complete();
        self.sync_progress();
        true
    }

    pub fn clear_loading(&mut self, id: RequestId) -> bool {
        if !self.is_current(id) || !self.state.phase.is_finished() || !self.state.loading {
            return false;
        }
        self.state.loading = false;
        true
    }

    /// Return to the form, keeping the previous request's field values
    pub fn back_to_form(&mut self) -> bool {
        if !self.state.phase.is_finished() {
            return false;
        }
        self.state.phase = Phase::Editing;
        self.state.view = View::Form;
        self.state.loading = false;
        self.state.error = None;
        self.state.field_errors.clear();
        true
    }
}
