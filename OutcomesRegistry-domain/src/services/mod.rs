pub mod classification;
pub mod contact_attempts;
pub mod email;
pub mod outcomes;
pub mod providers;
pub mod roles;
pub mod tracking;

// Domain services
// This module contains business logic implementations.

pub use classification::get_suggested_episode_type;
pub use contact_attempts::{create_default_contact_attempt_service, ContactAttemptError, ContactAttemptServiceTrait};
pub use email::{EmailService, EmailServiceTrait};
pub use outcomes::{evaluate_outcome, has_mcid_achieved};
pub use providers::{create_default_provider_lookup_service, ProviderLookupError, ProviderLookupServiceTrait};
pub use roles::{create_default_role_service, RoleServiceError, RoleServiceTrait};
pub use tracking::{create_default_tracking_service, TrackingError, TrackingServiceTrait};

use validator::ValidationErrors;

/// Flatten validator errors into one readable message
pub(crate) fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let error_msgs: Vec<String> = errors
                .iter()
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
                .collect();
            format!("{}: {}", field, error_msgs.join(", "))
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
