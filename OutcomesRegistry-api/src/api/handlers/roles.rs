use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{error, info, instrument};

use outcomes_registry_domain::entities::AppRole;
use outcomes_registry_domain::services::RoleServiceError;

use crate::api::state::RoleService;
use crate::entities::common::ErrorResponse;
use crate::entities::role::{AssignRoleRequest, UserRoleResponse};

/// Resolve a user's role and post-login destination
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/role",
    params(
        ("user_id" = String, Path, description = "Auth user id")
    ),
    responses(
        (status = 200, description = "Role resolution; defaults when nothing is stored", body = UserRoleResponse),
    ),
    tag = "roles"
)]
#[instrument(skip(service))]
pub async fn get_user_role(
    State(service): State<RoleService>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let resolution = service.resolve(&user_id).await;
    Json(UserRoleResponse::from(resolution))
}

/// Grant a role to a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/roles",
    params(
        ("user_id" = String, Path, description = "Auth user id")
    ),
    request_body = AssignRoleRequest,
    responses(
        (status = 201, description = "Role granted; returns the new resolution", body = UserRoleResponse),
        (status = 400, description = "Unknown role", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "roles"
)]
#[instrument(skip(service, request))]
pub async fn assign_user_role(
    State(service): State<RoleService>,
    Path(user_id): Path<String>,
    request: Result<Json<AssignRoleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = request.map_err(|e| ErrorResponse::validation_error(&e.body_text(), None))?;
    let role: AppRole = request
        .role
        .parse()
        .map_err(|e: String| ErrorResponse::validation_error(&e, None))?;

    match service.assign_role(&user_id, role).await {
        Ok(()) => {
            info!("Granted role {} to user {}", role, user_id);
            let resolution = service.resolve(&user_id).await;
            Ok((StatusCode::CREATED, Json(UserRoleResponse::from(resolution))))
        },
        Err(RoleServiceError::ValidationError(msg)) => Err(ErrorResponse::validation_error(&msg, None)),
        Err(e) => {
            error!("Error granting role: {}", e);
            Err(ErrorResponse::internal_error())
        }
    }
}
