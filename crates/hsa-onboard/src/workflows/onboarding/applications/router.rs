use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::audit::AuditRecorder;
use super::domain::{
    ApplicationId, EvaluationRequest, ExtractedEmploymentData, ExtractedIdentityData,
    PersonalInfoClaim,
};
use super::service::{DecisionServiceError, OnboardingDecisionService};

/// Wire payload for the evaluation endpoint. `today` optionally pins the
/// expiry comparison date so evaluations are reproducible.
#[derive(Debug, Deserialize)]
pub struct EvaluateApplicationRequest {
    pub application_id: String,
    pub claim: PersonalInfoClaim,
    pub identity: ExtractedIdentityData,
    #[serde(default)]
    pub employment: Option<ExtractedEmploymentData>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Router builder exposing HTTP endpoints for evaluation and audit
/// retrieval.
pub fn decision_router<A>(service: Arc<OnboardingDecisionService<A>>) -> Router
where
    A: AuditRecorder + 'static,
{
    Router::new()
        .route(
            "/api/v1/onboarding/decisions",
            post(evaluate_handler::<A>),
        )
        .route(
            "/api/v1/onboarding/decisions/:application_id/audit",
            get(audit_trail_handler::<A>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<A>(
    State(service): State<Arc<OnboardingDecisionService<A>>>,
    axum::Json(payload): axum::Json<EvaluateApplicationRequest>,
) -> Response
where
    A: AuditRecorder + 'static,
{
    let EvaluateApplicationRequest {
        application_id,
        claim,
        identity,
        employment,
        today,
    } = payload;

    let request = EvaluationRequest {
        application_id: ApplicationId(application_id),
        claim,
        identity,
        employment,
    };

    match service.evaluate(request, today) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(DecisionServiceError::Input(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "missing_fields": error.missing_fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn audit_trail_handler<A>(
    State(service): State<Arc<OnboardingDecisionService<A>>>,
    Path(application_id): Path<String>,
) -> Response
where
    A: AuditRecorder + 'static,
{
    let id = ApplicationId(application_id);
    match service.audit_trail(&id) {
        Ok(Some(trail)) => (StatusCode::OK, axum::Json(trail)).into_response(),
        Ok(None) => {
            let payload = json!({
                "application_id": id.0,
                "error": "no decisions recorded for application",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
