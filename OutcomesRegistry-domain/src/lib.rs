// Outcomes Registry Domain
// This crate contains the business logic for the outcomes registry service

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Transactional email
pub mod email;

// Search-as-you-type debouncing
pub mod debounce;

// Health checks and system status
pub mod health;

// Re-export the database module from the data crate for convenience
pub use outcomes_registry_data::database;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
