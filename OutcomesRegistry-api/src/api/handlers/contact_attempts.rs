use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{error, info, instrument, warn};

use outcomes_registry_domain::entities::contact::RecordContactAttempt;
use outcomes_registry_domain::services::ContactAttemptError;

use crate::api::state::ContactAttemptService;
use crate::entities::common::ErrorResponse;
use crate::entities::contact::{ContactAttemptResponse, CreateContactAttemptRequest};

/// Log an attempt to reach a lead
#[utoipa::path(
    post,
    path = "/api/v1/leads/{lead_id}/contact-attempts",
    params(
        ("lead_id" = String, Path, description = "Intake lead id")
    ),
    request_body = CreateContactAttemptRequest,
    responses(
        (status = 201, description = "Attempt logged", body = ContactAttemptResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "leads"
)]
#[instrument(skip(service, request))]
pub async fn create_contact_attempt(
    State(service): State<ContactAttemptService>,
    Path(lead_id): Path<String>,
    request: Result<Json<CreateContactAttemptRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = request.map_err(|e| ErrorResponse::validation_error(&e.body_text(), None))?;
    let attempt = RecordContactAttempt::try_from(request).map_err(|e| {
        warn!("Invalid contact attempt for lead {}: {}", lead_id, e);
        ErrorResponse::validation_error(&e, None)
    })?;

    match service.record(&lead_id, attempt).await {
        Ok(saved) => {
            info!("Contact attempt {} logged", saved.id);
            Ok((StatusCode::CREATED, Json(ContactAttemptResponse::from(saved))))
        },
        Err(ContactAttemptError::ValidationError(msg)) => Err(ErrorResponse::validation_error(&msg, None)),
        Err(e) => {
            error!("Error logging contact attempt: {}", e);
            Err(ErrorResponse::internal_error())
        }
    }
}

/// Contact attempts for a lead, newest first
#[utoipa::path(
    get,
    path = "/api/v1/leads/{lead_id}/contact-attempts",
    params(
        ("lead_id" = String, Path, description = "Intake lead id")
    ),
    responses(
        (status = 200, description = "Attempts, newest first", body = [ContactAttemptResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "leads"
)]
#[instrument(skip(service))]
pub async fn list_contact_attempts(
    State(service): State<ContactAttemptService>,
    Path(lead_id): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    match service.list(&lead_id).await {
        Ok(attempts) => {
            let body: Vec<ContactAttemptResponse> = attempts.into_iter().map(ContactAttemptResponse::from).collect();
            Ok(Json(body))
        },
        Err(e) => {
            error!("Error listing contact attempts: {}", e);
            Err(ErrorResponse::internal_error())
        }
    }
}
