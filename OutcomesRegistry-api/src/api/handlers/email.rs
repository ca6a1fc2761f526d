use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, instrument, warn};

use outcomes_registry_domain::email::EmailError;
use outcomes_registry_domain::entities::email::SentEmail;

use crate::api::state::LeadEmailService;
use crate::entities::common::SimpleErrorResponse;
use crate::entities::email::{SendApprovalEmailRequest, SendDeclineEmailRequest, SendEmailResponse};

fn into_response(kind: &str, result: Result<SentEmail, EmailError>) -> Response {
    match result {
        Ok(sent) => {
            info!("{} email accepted by provider", kind);
            (StatusCode::OK, Json(SendEmailResponse { success: true, id: sent.id })).into_response()
        },
        Err(EmailError::Validation(msg)) => {
            warn!("Rejected {} email request: {}", kind, msg);
            SimpleErrorResponse::with_status(StatusCode::BAD_REQUEST, msg)
        },
        Err(e) => {
            error!("Failed to send {} email: {}", kind, e);
            SimpleErrorResponse::with_status(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn bad_body(rejection: JsonRejection) -> Response {
    SimpleErrorResponse::with_status(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Email a lead that they have been accepted for care
#[utoipa::path(
    post,
    path = "/send-approval-email",
    request_body = SendApprovalEmailRequest,
    responses(
        (status = 200, description = "Email sent", body = SendEmailResponse),
        (status = 400, description = "Invalid request", body = SimpleErrorResponse),
        (status = 500, description = "Email provider failure", body = SimpleErrorResponse),
    ),
    tag = "email"
)]
#[instrument(skip(service, request))]
pub async fn send_approval_email(
    State(service): State<LeadEmailService>,
    request: Result<Json<SendApprovalEmailRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return bad_body(rejection),
    };
    into_response("approval", service.send_approval(request.into()).await)
}

/// Email a lead that the clinic cannot take them on
#[utoipa::path(
    post,
    path = "/send-decline-email",
    request_body = SendDeclineEmailRequest,
    responses(
        (status = 200, description = "Email sent", body = SendEmailResponse),
        (status = 400, description = "Invalid request", body = SimpleErrorResponse),
        (status = 500, description = "Email provider failure", body = SimpleErrorResponse),
    ),
    tag = "email"
)]
#[instrument(skip(service, request))]
pub async fn send_decline_email(
    State(service): State<LeadEmailService>,
    request: Result<Json<SendDeclineEmailRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return bad_body(rejection),
    };
    into_response("decline", service.send_decline(request.into()).await)
}
