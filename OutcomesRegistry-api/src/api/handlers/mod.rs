pub mod contact_attempts;
pub mod email;
pub mod health;
pub mod intake;
pub mod providers;
pub mod public_config;
pub mod roles;
pub mod tracking;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use contact_attempts::{create_contact_attempt, list_contact_attempts};
pub use email::{send_approval_email, send_decline_email};
pub use health::health_check;
pub use intake::{classify_intake, evaluate_mcid};
pub use providers::{create_provider, search_providers};
pub use public_config::get_public_client_id;
pub use roles::{assign_user_role, get_user_role};
pub use tracking::{create_delivery, track_click, track_open};
