// Domain entities and value objects
pub mod contact;
pub mod conversions;
pub mod delivery;
pub mod email;
pub mod episode;
pub mod outcome;
pub mod provider;
pub mod role;

// Re-export common types for easier imports
pub use contact::{ContactAttempt, ContactMethod, ContactOutcome, RecordContactAttempt};
pub use delivery::{CreateDeliveryRequest, DeliveryTracking};
pub use email::{ApprovalEmailRequest, ClinicContact, DeclineEmailRequest, EmailKind, EmailMessage, SentEmail};
pub use episode::EpisodeType;
pub use outcome::OutcomeEvaluation;
pub use provider::{PrimaryCareProvider, ProviderSearchOutcome};
pub use role::{AppRole, RoleResolution};
