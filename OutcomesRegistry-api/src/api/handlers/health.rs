use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use chrono::{SecondsFormat, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};
use utoipa::ToSchema;

use outcomes_registry_domain::health::{
    ComponentStatus as DomainComponentStatus, HealthService, HealthServiceTrait, SystemStatus,
};

use crate::api::state::SharedConfig;

/// Shared health service handle
pub type SharedHealthService = Arc<dyn HealthServiceTrait>;

/// Enhanced health check response model with more system information
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// When the response was generated (RFC 3339)
    pub timestamp: String,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Time spent producing this response
    pub response_time_ms: u64,
    /// Details about various components of the system
    pub components: ComponentStatus,
    /// Environment information
    pub environment: String,
}

/// Status of individual system components
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// Database connection status
    pub database: ComponentHealthStatus,
    /// API status
    pub api: ComponentHealthStatus,
    /// Additional components (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<serde_json::Value>,
}

/// Health status for an individual component
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok", "degraded", or "error")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

static SERVER_START_TIME: OnceCell<Instant> = OnceCell::new();

/// Record the server start time; later calls are ignored
pub fn initialize_server_start_time() {
    let _ = SERVER_START_TIME.set(Instant::now());
}

/// Health check endpoint to verify the API is running
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse),
        (status = 500, description = "API is not healthy", body = HealthResponse),
        (status = 503, description = "API is degraded", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(health_service, config))]
pub async fn health_check(
    Extension(health_service): Extension<SharedHealthService>,
    State(config): State<SharedConfig>,
) -> impl IntoResponse {
    let started = Instant::now();
    info!("Health check requested");

    let uptime = SERVER_START_TIME.get().map(|start| start.elapsed().as_secs());
    let system_health = health_service.get_system_health().await;

    let overall_status = match system_health.status {
        SystemStatus::Healthy => "ok",
        SystemStatus::Degraded => "degraded",
        SystemStatus::Unhealthy => "error",
    };

    let component = |name: &str| ComponentHealthStatus {
        status: system_health
            .components
            .get(name)
            .map(|c| map_component_status(&c.status))
            .unwrap_or_else(|| map_component_status(&DomainComponentStatus::Healthy)),
        message: system_health.components.get(name).and_then(|c| c.details.clone()),
    };

    let mut component_statuses = ComponentStatus {
        database: component("database"),
        api: component("api"),
        additional: None,
    };

    if system_health.components.len() > 2 {
        let additional_components: serde_json::Value = system_health
            .components
            .iter()
            .filter(|(name, _)| name.as_str() != "database" && name.as_str() != "api")
            .map(|(name, component)| {
                (
                    name.clone(),
                    serde_json::json!({
                        "status": map_component_status(&component.status),
                        "message": component.details,
                    }),
                )
            })
            .collect::<serde_json::Map<String, serde_json::Value>>()
            .into();

        component_statuses.additional = Some(additional_components);
    }

    let response = HealthResponse {
        status: overall_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime,
        response_time_ms: started.elapsed().as_millis() as u64,
        components: component_statuses,
        environment: config.environment.clone(),
    };

    let status = match system_health.status {
        SystemStatus::Healthy => StatusCode::OK,
        SystemStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        SystemStatus::Unhealthy => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(response))
}

/// Map domain component status to API status string
fn map_component_status(status: &DomainComponentStatus) -> String {
    match status {
        DomainComponentStatus::Healthy => "ok",
        DomainComponentStatus::Degraded => "degraded",
        DomainComponentStatus::Unhealthy => "error",
    }
    .to_string()
}

/// Factory function to create a health service
pub fn create_health_service() -> SharedHealthService {
    Arc::new(HealthService)
}
