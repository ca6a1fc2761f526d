use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use tracing::{debug, instrument};

use outcomes_registry_domain::services::{evaluate_outcome, get_suggested_episode_type};

use crate::entities::common::ErrorResponse;
use crate::entities::intake::{ClassifyIntakeRequest, ClassifyIntakeResponse, McidRequest, McidResponse};

/// Suggest NEURO, MSK or UNKNOWN from intake answers
#[utoipa::path(
    post,
    path = "/api/v1/intake/classify",
    request_body = ClassifyIntakeRequest,
    responses(
        (status = 200, description = "Suggested episode type", body = ClassifyIntakeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "intake"
)]
#[instrument(skip(request))]
pub async fn classify_intake(
    request: Result<Json<ClassifyIntakeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = request.map_err(|e| ErrorResponse::validation_error(&e.body_text(), None))?;

    let episode_type = get_suggested_episode_type(request.category.as_deref(), request.concern.as_deref());
    debug!("Intake classified as {}", episode_type);

    Ok((
        StatusCode::OK,
        Json(ClassifyIntakeResponse {
            episode_type: episode_type.as_str().to_string(),
        }),
    ))
}

/// Evaluate whether an outcome change meets the MCID for its index
#[utoipa::path(
    post,
    path = "/api/v1/outcomes/mcid",
    request_body = McidRequest,
    responses(
        (status = 200, description = "MCID evaluation", body = McidResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "outcomes"
)]
#[instrument(skip(request))]
pub async fn evaluate_mcid(
    request: Result<Json<McidRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = request.map_err(|e| ErrorResponse::validation_error(&e.body_text(), None))?;

    let evaluation = evaluate_outcome(request.baseline, request.final_score, &request.index_type);
    Ok((StatusCode::OK, Json(McidResponse::from(evaluation))))
}
