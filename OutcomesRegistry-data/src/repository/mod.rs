// Repository module structure
pub mod errors;
mod clinic_settings;
mod contact_attempt;
mod delivery;
mod in_memory;
mod notification;
mod provider;
mod storage;
mod user;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use clinic_settings::{ClinicSettingsRepository, ClinicSettingsRepositoryTrait};
pub use contact_attempt::{ContactAttemptRepository, ContactAttemptRepositoryTrait};
pub use delivery::{DeliveryRepository, DeliveryRepositoryTrait};
pub use in_memory::InMemoryStorage;
pub use notification::{NotificationRepository, NotificationRepositoryTrait};
pub use provider::{ProviderRepository, ProviderRepositoryTrait};
pub use storage::DatabaseStorage;
pub use user::{UserRepository, UserRepositoryTrait};

use crate::database::{get_db_pool, DatabasePool};

/// Pool a repository should use: its own if it was given one, otherwise the
/// global pool. `None` means the in-memory storage is in charge.
fn resolve_pool(own: &Option<DatabasePool>) -> Option<DatabasePool> {
    own.clone().or_else(|| get_db_pool().ok())
}
