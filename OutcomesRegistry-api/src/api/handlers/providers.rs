use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::{error, instrument};
use utoipa::IntoParams;
use uuid::Uuid;

use outcomes_registry_domain::services::ProviderLookupError;

use crate::api::state::ProviderLookupService;
use crate::entities::common::ErrorResponse;
use crate::entities::provider::{CreateProviderRequest, ProviderResponse, ProviderSearchResponse};

/// Query parameters for the provider search box
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProviderSearchParams {
    /// Text typed so far
    #[serde(default)]
    pub q: String,

    /// Stable id of the searching client; searches with the same key debounce each other
    pub client_key: Option<String>,
}

/// Debounced primary-care provider lookup
#[utoipa::path(
    get,
    path = "/api/v1/providers/search",
    params(ProviderSearchParams),
    responses(
        (status = 200, description = "Matches, or an empty superseded result", body = ProviderSearchResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "providers"
)]
#[instrument(skip(service))]
pub async fn search_providers(
    State(service): State<ProviderLookupService>,
    Query(params): Query<ProviderSearchParams>,
) -> Result<impl IntoResponse, ErrorResponse> {
    // Without a key the call cannot be superseded
    let client_key = params
        .client_key
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    match service.search(&client_key, &params.q).await {
        Ok(outcome) => Ok(Json(ProviderSearchResponse::from(outcome))),
        Err(e) => {
            error!("Provider search failed: {}", e);
            Err(ErrorResponse::internal_error())
        }
    }
}

/// Add a provider to the directory
#[utoipa::path(
    post,
    path = "/api/v1/providers",
    request_body = CreateProviderRequest,
    responses(
        (status = 201, description = "Provider added", body = ProviderResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "providers"
)]
#[instrument(skip(service, request))]
pub async fn create_provider(
    State(service): State<ProviderLookupService>,
    request: Result<Json<CreateProviderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = request.map_err(|e| ErrorResponse::validation_error(&e.body_text(), None))?;

    match service.add_provider(request.into_domain(Uuid::new_v4().to_string())).await {
        Ok(provider) => Ok((StatusCode::CREATED, Json(ProviderResponse::from(provider)))),
        Err(ProviderLookupError::ValidationError(msg)) => Err(ErrorResponse::validation_error(&msg, None)),
        Err(e) => {
            error!("Error adding provider: {}", e);
            Err(ErrorResponse::internal_error())
        }
    }
}
