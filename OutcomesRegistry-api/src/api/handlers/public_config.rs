use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};
use utoipa::ToSchema;

use crate::entities::common::SimpleErrorResponse;

/// Publishable client identifier for browser SDKs
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicClientIdResponse {
    pub client_id: String,
}

/// Return `PUBLIC_CLIENT_ID`, read on every call so rotation needs no restart
#[utoipa::path(
    post,
    path = "/get-public-client-id",
    responses(
        (status = 200, description = "Client id", body = PublicClientIdResponse),
        (status = 500, description = "Client id not configured", body = SimpleErrorResponse),
    ),
    tag = "config"
)]
#[instrument]
pub async fn get_public_client_id() -> Response {
    match std::env::var("PUBLIC_CLIENT_ID") {
        Ok(client_id) if !client_id.trim().is_empty() => {
            (StatusCode::OK, Json(PublicClientIdResponse { client_id })).into_response()
        },
        _ => {
            error!("PUBLIC_CLIENT_ID is not configured");
            SimpleErrorResponse::with_status(StatusCode::INTERNAL_SERVER_ERROR, "PUBLIC_CLIENT_ID is not configured")
        }
    }
}
