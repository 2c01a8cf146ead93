//! Form endpoints: catalog, submission, state and reset

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rpm_core::config::SchoolProfile;
use rpm_core::lesson::{
    ClassLevel, GraduateDimension, GreetingLanguage, IntegrationOption, LessonPlanRequest,
    PedagogicalPractice, SUBJECTS, Semester,
};
use rpm_core::session::{RequestId, UiState};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::AppState;

/// Choices offered by the form, in display order
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub subjects: &'static [&'static str],
    pub class_levels: &'static [ClassLevel],
    pub semesters: &'static [Semester],
    pub languages: &'static [GreetingLanguage],
    pub pedagogical_practices: &'static [PedagogicalPractice],
    pub graduate_dimensions: &'static [GraduateDimension],
    pub integration_options: &'static [IntegrationOption],
    pub default_request: LessonPlanRequest,
    pub example_request: LessonPlanRequest,
    pub school: SchoolProfile,
}

/// GET /api/catalog
pub async fn catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        subjects: SUBJECTS,
        class_levels: ClassLevel::ALL,
        semesters: Semester::ALL,
        languages: GreetingLanguage::ALL,
        pedagogical_practices: PedagogicalPractice::ALL,
        graduate_dimensions: GraduateDimension::ALL,
        integration_options: IntegrationOption::ALL,
        default_request: LessonPlanRequest::default(),
        example_request: LessonPlanRequest::example(),
        school: state.config.school.clone(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub request_id: RequestId,
}

/// POST /api/generate
///
/// 422 with the field errors when validation fails; otherwise 202 and the
/// generation continues in the background, observable through
/// `/api/events`. A body that does not decode gets a JSON `{ error }` with
/// the extractor's status.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<LessonPlanRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(status = %rejection.status(), "malformed lesson-plan request");
            return (rejection.status(), Json(json!({ "error": rejection.body_text() })))
                .into_response();
        }
    };

    let id = match state.runner.submit(request.clone()) {
        Ok(id) => id,
        Err(errors) => {
            debug!(count = errors.len(), "submission rejected");
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response();
        }
    };

    info!(
        request_id = %id,
        subject = %request.subject,
        meetings = request.meetings,
        "lesson plan requested"
    );
    let runner = state.runner.clone();
    tokio::spawn(async move {
        runner.run(id, request).await;
    });

    (StatusCode::ACCEPTED, Json(GenerateResponse { request_id: id })).into_response()
}

/// GET /api/state
pub async fn current_state(State(state): State<AppState>) -> Json<UiState> {
    Json(state.snapshot())
}

/// POST /api/reset
///
/// Returns to the form once the current request has finished. 409 while a
/// generation is still in flight.
pub async fn reset(State(state): State<AppState>) -> Response {
    let accepted = state.runner.update(|session| session.back_to_form());
    let snapshot = state.snapshot();
    let status = if !accepted && snapshot.phase.is_in_flight() {
        StatusCode::CONFLICT
    } else {
        StatusCode::OK
    };
    (status, Json(snapshot)).into_response()
}
