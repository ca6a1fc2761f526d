//! Database connection module for the outcomes registry
//!
//! SQLite is the only backend. The pool is created once at startup and shared
//! through a global cell; repositories that find no pool fall back to their
//! in-memory storage.

use std::env;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use once_cell::sync::OnceCell;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{info, error, warn};

use super::migrations::run_sqlite_migrations;

/// Global database pool used throughout the application
static DB_POOL: OnceCell<DatabasePool> = OnceCell::new();

/// Pooled SQLite connection handed out to storage code
pub type SqliteConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// SQLite database (file-based)
    Sqlite,
}

impl DatabaseType {
    /// Convert from string to database type
    pub fn parse(s: &str) -> Result<Self, DatabaseError> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(DatabaseType::Sqlite),
            _ => Err(DatabaseError::UnsupportedDatabaseType(s.to_string())),
        }
    }
}

/// Database connection pool
#[derive(Debug, Clone)]
pub enum DatabasePool {
    /// SQLite connection pool
    SQLite(Arc<r2d2::Pool<SqliteConnectionManager>>),
}

impl DatabasePool {
    /// Check out a connection from the pool
    pub fn connection(&self) -> Result<SqliteConnection, DatabaseError> {
        match self {
            DatabasePool::SQLite(pool) => Ok(pool.get()?),
        }
    }

    /// Build a private in-memory pool with the schema applied.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// capped at a single connection.
    pub fn in_memory() -> Result<Self, DatabaseError> {
        let manager = SqliteConnectionManager::memory();
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(manager)?;

        let conn = pool.get()?;
        run_sqlite_migrations(&conn).map_err(DatabaseError::MigrationError)?;

        Ok(DatabasePool::SQLite(Arc::new(pool)))
    }
}

/// Database error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// SQLite connection pool error
    #[error("SQLite connection pool error: {0}")]
    SqlitePoolError(#[from] r2d2::Error),

    /// Database pool already initialized
    #[error("Database pool is already initialized")]
    PoolAlreadyInitialized,

    /// Database pool not initialized
    #[error("Database pool is not initialized")]
    PoolNotInitialized,

    /// Unsupported database type
    #[error("Unsupported database type: {0}")]
    UnsupportedDatabaseType(String),

    /// Migration error
    #[error("Database migration error: {0}")]
    MigrationError(String),

    /// Generic database error
    #[error("Database error: {0}")]
    GenericError(String),
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database type
    pub db_type: DatabaseType,
    /// Path to SQLite database file
    pub sqlite_path: Option<String>,
    /// Maximum number of pooled connections
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DatabaseType::Sqlite,
            sqlite_path: Some("data/outcomes_registry.db".to_string()),
            pool_size: 5,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        let db_type_str = env::var("DB_TYPE").unwrap_or_else(|_| "sqlite".to_string());
        let db_type = DatabaseType::parse(&db_type_str)?;

        let sqlite_path = env::var("DB_SQLITE_PATH").ok();
        match sqlite_path {
            Some(ref path) => info!("Using SQLite database at: {}", path),
            None => info!("No DB_SQLITE_PATH provided, will use default path: data/outcomes_registry.db"),
        }

        let pool_size = env::var("DB_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(5);

        let timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        info!("Database configuration: pool_size={}, timeout={}s", pool_size, timeout_seconds);

        Ok(DatabaseConfig {
            db_type,
            sqlite_path,
            pool_size,
            timeout_seconds,
        })
    }
}

/// Initialize the database connection pool
pub fn initialize_database_pool() -> Result<(), DatabaseError> {
    if DB_POOL.get().is_some() {
        return Err(DatabaseError::PoolAlreadyInitialized);
    }

    let config = DatabaseConfig::from_env()?;

    info!("Initializing database pool with type: {:?}", config.db_type);

    let pool = match config.db_type {
        DatabaseType::Sqlite => initialize_sqlite_pool(&config)?,
    };

    DB_POOL.set(pool).map_err(|_| DatabaseError::PoolAlreadyInitialized)?;
    run_migrations()
}

/// Get the database connection pool
pub fn get_db_pool() -> Result<DatabasePool, DatabaseError> {
    DB_POOL.get()
        .cloned()
        .ok_or(DatabaseError::PoolNotInitialized)
}

/// Initialize SQLite connection pool
fn initialize_sqlite_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    use rusqlite::OpenFlags;
    use std::fs;
    use std::path::Path;

    let sqlite_path = config.sqlite_path.clone()
        .unwrap_or_else(|| "data/outcomes_registry.db".to_string());

    info!("Initializing SQLite database at: {}", sqlite_path);

    if let Some(parent) = Path::new(&sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create directory: {}, falling back to in-memory database", e);
                return DatabasePool::in_memory();
            }
        }
    }

    let manager = SqliteConnectionManager::file(&sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

    match r2d2::Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager) {
            Ok(pool) => {
                info!("SQLite connection pool created successfully");
                Ok(DatabasePool::SQLite(Arc::new(pool)))
            },
            Err(e) => {
                error!("Failed to create SQLite connection pool: {}", e);
                warn!("Falling back to in-memory SQLite database");
                DatabasePool::in_memory()
            }
        }
}

/// Run database migrations against the global pool
fn run_migrations() -> Result<(), DatabaseError> {
    let pool = get_db_pool()?;

    info!("Running database migrations");
    let conn = pool.connection()?;
    run_sqlite_migrations(&conn).map_err(DatabaseError::MigrationError)?;
    info!("Database migrations completed successfully");

    Ok(())
}

/// Get information about the current database connection
pub fn get_connection_info() -> Option<String> {
    let pool = DB_POOL.get()?;

    match pool {
        DatabasePool::SQLite(pool) => match pool.get() {
            Ok(conn) => {
                let location = match conn.query_row(
                    "PRAGMA database_list",
                    [],
                    |row| row.get::<_, String>(2),
                ) {
                    Ok(path) if path.is_empty() || path == ":memory:" => "SQLite in-memory database".to_string(),
                    Ok(path) => format!("SQLite database at {}", path),
                    Err(_) => "SQLite database (path unknown)".to_string(),
                };

                let state = pool.state();
                Some(format!(
                    "{} healthy (connections: active={}, idle={})",
                    location, state.connections, state.idle_connections
                ))
            },
            Err(e) => {
                error!("Failed to get SQLite connection: {}", e);
                Some(format!("SQLite connection error: {}", e))
            }
        },
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.db_type, DatabaseType::Sqlite);
        assert!(config.sqlite_path.is_some());
        assert_eq!(config.pool_size, 5);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_database_type_parse() {
        assert_eq!(DatabaseType::parse("sqlite").unwrap(), DatabaseType::Sqlite);
        assert_eq!(DatabaseType::parse("SQLite").unwrap(), DatabaseType::Sqlite);
        assert!(DatabaseType::parse("postgres").is_err());
    }

    #[test]
    fn test_in_memory_pool_has_schema() {
        let pool = DatabasePool::in_memory().unwrap();
        let conn = pool.connection().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'comparison_report_deliveries'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
