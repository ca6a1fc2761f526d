use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Tracking endpoints
        crate::api::handlers::tracking::track_open,
        crate::api::handlers::tracking::track_click,
        crate::api::handlers::tracking::create_delivery,

        // Lead email endpoints
        crate::api::handlers::email::send_approval_email,
        crate::api::handlers::email::send_decline_email,
        crate::api::handlers::public_config::get_public_client_id,

        // Clinical rules
        crate::api::handlers::intake::classify_intake,
        crate::api::handlers::intake::evaluate_mcid,

        // Roles
        crate::api::handlers::roles::get_user_role,
        crate::api::handlers::roles::assign_user_role,

        // Leads and providers
        crate::api::handlers::contact_attempts::create_contact_attempt,
        crate::api::handlers::contact_attempts::list_contact_attempts,
        crate::api::handlers::providers::search_providers,
        crate::api::handlers::providers::create_provider
    ),
    components(
        schemas(
            // Entities
            crate::entities::common::ErrorResponse,
            crate::entities::common::SimpleErrorResponse,
            crate::entities::tracking::CreateDeliveryPayload,
            crate::entities::tracking::DeliveryResponse,
            crate::entities::email::SendApprovalEmailRequest,
            crate::entities::email::SendDeclineEmailRequest,
            crate::entities::email::SendEmailResponse,
            crate::entities::intake::ClassifyIntakeRequest,
            crate::entities::intake::ClassifyIntakeResponse,
            crate::entities::intake::McidRequest,
            crate::entities::intake::McidResponse,
            crate::entities::role::UserRoleResponse,
            crate::entities::role::AssignRoleRequest,
            crate::entities::contact::CreateContactAttemptRequest,
            crate::entities::contact::ContactAttemptResponse,
            crate::entities::provider::ProviderResponse,
            crate::entities::provider::CreateProviderRequest,
            crate::entities::provider::ProviderSearchResponse,

            // Handler-local schemas
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,
            crate::api::handlers::public_config::PublicClientIdResponse
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "tracking", description = "Comparison report open and click tracking"),
        (name = "email", description = "Lead approval and decline emails"),
        (name = "config", description = "Public client configuration"),
        (name = "intake", description = "Intake classification"),
        (name = "outcomes", description = "Outcome measure evaluation"),
        (name = "roles", description = "User roles and post-login routing"),
        (name = "leads", description = "Lead contact log"),
        (name = "providers", description = "Primary-care provider directory")
    ),
    info(
        title = "Outcomes Registry API",
        version = "0.1.0",
        description = "Outcomes registry and intake service for a physical therapy and neurology practice",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
