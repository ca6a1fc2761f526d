// Public entities for the outcomes registry API
// This module contains data structures that are shared across the application boundary

// Common entities for error handling
pub mod common;

pub mod contact;
pub mod email;
pub mod intake;
pub mod provider;
pub mod role;
pub mod tracking;
