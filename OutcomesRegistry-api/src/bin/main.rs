use std::net::SocketAddr;
use std::path::PathBuf;
use dotenv::dotenv;
use tokio::signal;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};
use outcomes_registry_api::api::create_application;
use outcomes_registry_api::config::AppConfig;

/// Make sure `DB_SQLITE_PATH` points somewhere writable under `DATA_DIR`
fn prepare_data_dir() -> anyhow::Result<()> {
    if std::env::var("DB_SQLITE_PATH").is_ok() {
        return Ok(());
    }

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let data_path = PathBuf::from(&data_dir);
    if !data_path.exists() {
        info!("Creating data directory: {}", data_dir);
        std::fs::create_dir_all(&data_path)?;
    }

    let db_path = data_path.join("outcomes_registry.db");
    std::env::set_var("DB_SQLITE_PATH", db_path.to_string_lossy().to_string());
    info!("Set DB_SQLITE_PATH to {}", db_path.display());
    Ok(())
}

/// The main entry point for the outcomes registry API server
///
/// This function:
/// 1. Initializes environment variables from .env file
/// 2. Sets up tracing for logging
/// 3. Ensures the data directory exists
/// 4. Initializes the database connection pool
/// 5. Creates and starts the Axum web application
/// 6. Handles graceful shutdown
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(false)
            .with_ansi(true)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stdout))
        .with(env_filter)
        .init();

    info!("Starting outcomes registry API server");

    if let Err(e) = prepare_data_dir() {
        error!("Failed to prepare data directory: {}", e);
        return Err(e.into());
    }

    match outcomes_registry_data::database::initialize_database_pool() {
        Ok(_) => info!("Database pool initialized successfully"),
        Err(e) => {
            // Repositories fall back to in-memory storage
            warn!("Failed to initialize database pool: {}", e);
        }
    }

    let config = AppConfig::from_env()?;
    let port = config.port;
    let app = create_application(config).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    // Create a TCP listener and bind to the address
    let listener = TcpListener::bind(addr).await?;

    // Serve the application with graceful shutdown support
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Sets up a signal handler for graceful shutdown
///
/// Waits for either CTRL+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}
