use std::sync::Arc;

use axum::extract::FromRef;

use outcomes_registry_data::repository::{ClinicSettingsRepository, NotificationRepository};
use outcomes_registry_domain::email::ResendEmailProvider;
use outcomes_registry_domain::services::contact_attempts::create_default_contact_attempt_service;
use outcomes_registry_domain::services::providers::create_default_provider_lookup_service;
use outcomes_registry_domain::services::roles::create_default_role_service;
use outcomes_registry_domain::services::tracking::create_default_tracking_service;
use outcomes_registry_domain::services::{
    ContactAttemptServiceTrait, EmailService, EmailServiceTrait, ProviderLookupServiceTrait, RoleServiceTrait,
    TrackingServiceTrait,
};

use crate::config::AppConfig;

/// Service types for dependency injection
pub type SharedConfig = Arc<AppConfig>;
pub type TrackingService = Arc<dyn TrackingServiceTrait>;
pub type LeadEmailService = Arc<dyn EmailServiceTrait>;
pub type RoleService = Arc<dyn RoleServiceTrait>;
pub type ContactAttemptService = Arc<dyn ContactAttemptServiceTrait>;
pub type ProviderLookupService = Arc<dyn ProviderLookupServiceTrait>;

/// Everything the handlers need, shared across requests
#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: SharedConfig,
    pub tracking: TrackingService,
    pub email: LeadEmailService,
    pub roles: RoleService,
    pub contact_attempts: ContactAttemptService,
    pub providers: ProviderLookupService,
}

impl AppState {
    /// Production wiring: repositories over the global pool and the Resend provider
    pub fn with_defaults(config: AppConfig) -> Self {
        let email = EmailService::new(
            ResendEmailProvider::from_env(),
            NotificationRepository::new(),
            ClinicSettingsRepository::new(),
        );

        Self {
            config: Arc::new(config),
            tracking: Arc::new(create_default_tracking_service()),
            email: Arc::new(email),
            roles: Arc::new(create_default_role_service()),
            contact_attempts: Arc::new(create_default_contact_attempt_service()),
            providers: Arc::new(create_default_provider_lookup_service()),
        }
    }

    pub fn with_tracking(mut self, tracking: TrackingService) -> Self {
        self.tracking = tracking;
        self
    }

    pub fn with_email(mut self, email: LeadEmailService) -> Self {
        self.email = email;
        self
    }

    pub fn with_roles(mut self, roles: RoleService) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_providers(mut self, providers: ProviderLookupService) -> Self {
        self.providers = providers;
        self
    }
}
