// Outcomes registry data layer
// Connection management, schema migrations, storage models and repositories

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
