use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::debug;

use crate::api::handlers::{self, health};
use crate::api::handlers::health::SharedHealthService;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// CORS for browser callers on any origin
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Build the router around an explicit state and health service
pub fn build_router(state: AppState, health_service: SharedHealthService) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route("/intake/classify", post(handlers::classify_intake))
        .route("/outcomes/mcid", post(handlers::evaluate_mcid))
        .route("/comparison-reports/deliveries", post(handlers::create_delivery))
        .route("/users/:user_id/role", get(handlers::get_user_role))
        .route("/users/:user_id/roles", post(handlers::assign_user_role))
        .route(
            "/leads/:lead_id/contact-attempts",
            get(handlers::list_contact_attempts).post(handlers::create_contact_attempt),
        )
        .route("/providers/search", get(handlers::search_providers))
        .route("/providers", post(handlers::create_provider));

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/track/open", get(handlers::track_open))
        .route("/track/click", get(handlers::track_click))
        .route("/send-approval-email", post(handlers::send_approval_email))
        .route("/send-decline-email", post(handlers::send_decline_email))
        .route("/get-public-client-id", post(handlers::get_public_client_id));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(Extension(health_service));

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    app.layer(cors_layer()).layer(TraceLayer::new_for_http())
}

/// Create the application router with production services
pub async fn create_app(config: AppConfig) -> Router {
    let state = AppState::with_defaults(config);

    health::initialize_server_start_time();
    debug!("Health check service initialized");

    build_router(state, health::create_health_service())
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}
