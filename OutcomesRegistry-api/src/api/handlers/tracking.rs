use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};
use utoipa::IntoParams;
use validator::Validate;

use outcomes_registry_domain::services::tracking::{resolve_click_target, TrackingLinks, TRACKING_PIXEL};
use outcomes_registry_domain::services::TrackingError;

use crate::api::state::{SharedConfig, TrackingService};
use crate::entities::common::ErrorResponse;
use crate::entities::tracking::{CreateDeliveryPayload, DeliveryResponse};

/// Query parameters of the open pixel
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OpenParams {
    /// Tracking id of the delivery
    pub tracking_id: Option<String>,
}

/// Query parameters of the click redirect
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClickParams {
    /// Tracking id of the delivery
    pub id: Option<String>,
    /// Percent-encoded destination
    pub url: Option<String>,
}

fn pixel_response() -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/gif"),
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate, private"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        TRACKING_PIXEL.clone(),
    )
        .into_response()
}

fn log_tracking_failure(kind: &str, tracking_id: &str, err: TrackingError) {
    match err {
        TrackingError::NotFound(_) | TrackingError::InvalidTrackingId(_) => {
            warn!("Ignoring {} for tracking id {}: {}", kind, tracking_id, err)
        },
        _ => error!("Failed to record {} for tracking id {}: {}", kind, tracking_id, err),
    }
}

/// Email open pixel. Always answers with the GIF.
#[utoipa::path(
    get,
    path = "/track/open",
    params(OpenParams),
    responses(
        (status = 200, description = "1x1 transparent GIF")
    ),
    tag = "tracking"
)]
#[instrument(skip(service, params))]
pub async fn track_open(
    State(service): State<TrackingService>,
    params: Option<Query<OpenParams>>,
) -> Response {
    let tracking_id = params
        .and_then(|Query(p)| p.tracking_id)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    match tracking_id {
        Some(id) => {
            if let Err(e) = service.record_open(&id).await {
                log_tracking_failure("open", &id, e);
            }
        },
        None => warn!("Open pixel requested without a tracking id"),
    }

    pixel_response()
}

/// Tracked link. Counts the click and redirects to the target.
#[utoipa::path(
    get,
    path = "/track/click",
    params(ClickParams),
    responses(
        (status = 302, description = "Redirect to the decoded target or the default URL")
    ),
    tag = "tracking"
)]
#[instrument(skip(service, config, params))]
pub async fn track_click(
    State(service): State<TrackingService>,
    State(config): State<SharedConfig>,
    params: Option<Query<ClickParams>>,
) -> Response {
    let (tracking_id, url) = match params {
        Some(Query(p)) => (p.id, p.url),
        None => (None, None),
    };

    match tracking_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => {
            if let Err(e) = service.record_click(id).await {
                log_tracking_failure("click", id, e);
            }
        },
        None => warn!("Click redirect requested without a tracking id"),
    }

    let target = resolve_click_target(url.as_deref(), &config.default_redirect_url);
    (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()
}

/// Register a comparison report delivery and get its tracking URLs
#[utoipa::path(
    post,
    path = "/api/v1/comparison-reports/deliveries",
    request_body = CreateDeliveryPayload,
    responses(
        (status = 201, description = "Delivery registered", body = DeliveryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "tracking"
)]
#[instrument(skip(service, config, payload))]
pub async fn create_delivery(
    State(service): State<TrackingService>,
    State(config): State<SharedConfig>,
    payload: Result<Json<CreateDeliveryPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(payload) = payload.map_err(|e| ErrorResponse::validation_error(&e.body_text(), None))?;
    payload
        .validate()
        .map_err(|e| ErrorResponse::validation_error("Invalid delivery request", serde_json::to_value(&e).ok()))?;

    match service.create_delivery(payload.into()).await {
        Ok(delivery) => {
            info!("Created delivery {}", delivery.tracking_id);
            let links = TrackingLinks::for_tracking_id(&config.public_base_url, &delivery.tracking_id);
            Ok((StatusCode::CREATED, Json(DeliveryResponse::new(delivery, links))))
        },
        Err(TrackingError::InvalidTrackingId(msg)) => Err(ErrorResponse::validation_error(&msg, None)),
        Err(TrackingError::Conflict(msg)) => Err(ErrorResponse::conflict(&msg)),
        Err(e) => {
            error!("Error creating delivery: {}", e);
            Err(ErrorResponse::internal_error())
        }
    }
}
