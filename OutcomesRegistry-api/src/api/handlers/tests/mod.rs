mod email_test;
mod health_test;
mod intake_test;
mod leads_test;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use outcomes_registry_data::repository::{ClinicSettingsRepository, NotificationRepository};
use outcomes_registry_domain::health::HealthServiceTrait;
use outcomes_registry_domain::services::EmailService;
use outcomes_registry_domain::testing::{MockHealthService, RecordingEmailProvider};

use crate::api::routes::build_router;
use crate::api::state::AppState;
use crate::config::AppConfig;

pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        environment: "test".to_string(),
        public_base_url: "https://api.clinic.test".to_string(),
        default_redirect_url: "https://clinic.test/".to_string(),
    }
}

/// State over fresh in-memory repositories and a recording email provider
pub(crate) fn test_state() -> AppState {
    let email = EmailService::new(
        RecordingEmailProvider::new(),
        NotificationRepository::new(),
        ClinicSettingsRepository::new(),
    )
    .with_from_address("Test Clinic <noreply@clinic.test>");

    AppState::with_defaults(test_config()).with_email(Arc::new(email))
}

pub(crate) fn test_app(state: AppState) -> Router {
    test_app_with_health(state, Arc::new(MockHealthService::new()))
}

pub(crate) fn test_app_with_health(state: AppState, health: Arc<dyn HealthServiceTrait>) -> Router {
    build_router(state, health)
}

pub(crate) fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub(crate) fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

/// Drive one request through the router
pub(crate) async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

pub(crate) fn as_json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}
