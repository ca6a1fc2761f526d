use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use outcomes_registry_data::repository::{RepositoryError, UserRepository, UserRepositoryTrait};

use crate::entities::role::{AppRole, RoleResolution};

/// Landing page for users without a staff role
pub const DEFAULT_ROUTE: &str = "/patient-portal";

/// Role service errors
#[derive(Debug, Error)]
pub enum RoleServiceError {
    /// Bad user id or role name
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for RoleServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(msg) => RoleServiceError::ValidationError(msg),
            other => RoleServiceError::RepositoryError(other.to_string()),
        }
    }
}

/// Highest-priority role in the list
pub fn primary_role(roles: &[AppRole]) -> Option<AppRole> {
    roles.iter().copied().min_by_key(AppRole::priority)
}

/// Where a user lands after signing in
pub fn post_login_route(role: Option<AppRole>) -> &'static str {
    match role {
        Some(AppRole::Admin) => "/admin",
        Some(AppRole::Clinician) => "/dashboard",
        Some(AppRole::FrontDesk) => "/intake",
        Some(AppRole::Patient) | None => DEFAULT_ROUTE,
    }
}

/// Trait for role lookups
#[async_trait]
pub trait RoleServiceTrait: Send + Sync {
    /// Resolve a user's roles and landing page. Never fails; lookup problems
    /// yield the patient default.
    async fn resolve(&self, user_id: &str) -> RoleResolution;

    /// Grant a role to a user
    async fn assign_role(&self, user_id: &str, role: AppRole) -> Result<(), RoleServiceError>;
}

/// Role service for domain logic
pub struct RoleService<R: UserRepositoryTrait> {
    repository: R,
}

impl<R: UserRepositoryTrait> RoleService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn fallback(user_id: &str) -> RoleResolution {
        RoleResolution {
            user_id: user_id.to_string(),
            role: None,
            roles: Vec::new(),
            display_name: None,
            redirect_to: DEFAULT_ROUTE.to_string(),
        }
    }
}

#[async_trait]
impl<R: UserRepositoryTrait> RoleServiceTrait for RoleService<R> {
    async fn resolve(&self, user_id: &str) -> RoleResolution {
        let stored = match self.repository.get_roles(user_id).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Role lookup failed for user {}, using default: {}", user_id, e);
                return Self::fallback(user_id);
            }
        };

        let mut roles: Vec<AppRole> = stored
            .iter()
            .filter_map(|name| match name.parse::<AppRole>() {
                Ok(role) => Some(role),
                Err(e) => {
                    warn!("Skipping stored role for user {}: {}", user_id, e);
                    None
                }
            })
            .collect();
        roles.sort_by_key(AppRole::priority);
        roles.dedup();

        let display_name = match self.repository.get_profile(user_id).await {
            Ok(profile) => profile.and_then(|p| p.full_name.or(p.email)),
            Err(e) => {
                warn!("Profile lookup failed for user {}: {}", user_id, e);
                None
            }
        };

        let role = primary_role(&roles);
        debug!("User {} resolved to role {:?}", user_id, role);

        RoleResolution {
            user_id: user_id.to_string(),
            role,
            roles,
            display_name,
            redirect_to: post_login_route(role).to_string(),
        }
    }

    async fn assign_role(&self, user_id: &str, role: AppRole) -> Result<(), RoleServiceError> {
        if user_id.trim().is_empty() {
            return Err(RoleServiceError::ValidationError("user id is required".to_string()));
        }
        self.repository.assign_role(user_id, role.as_str()).await?;
        Ok(())
    }
}

/// Role service over the default user repository
pub fn create_default_role_service() -> RoleService<UserRepository> {
    RoleService::new(UserRepository::new())
}
