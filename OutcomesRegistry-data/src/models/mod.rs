// Storage models, one struct per table row plus the inputs used to create rows

pub mod clinic;
pub mod contact_attempt;
pub mod delivery;
pub mod notification;
pub mod provider;
pub mod user;
