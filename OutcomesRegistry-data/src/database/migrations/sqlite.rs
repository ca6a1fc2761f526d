use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_profiles_table(conn)?;
    create_clinic_settings_table(conn)?;
    create_user_roles_table(conn)?;
    create_comparison_report_deliveries_table(conn)?;
    create_notifications_history_table(conn)?;
    create_contact_attempts_table(conn)?;
    create_primary_care_providers_table(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

fn create_profiles_table(conn: &Connection) -> Result<(), String> {
    info!("Creating profiles table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS profiles (
            id TEXT PRIMARY KEY,
            email TEXT,
            full_name TEXT,
            clinic_name TEXT,
            created_at TEXT NOT NULL
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

fn create_clinic_settings_table(conn: &Connection) -> Result<(), String> {
    info!("Creating clinic_settings table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS clinic_settings (
            id TEXT PRIMARY KEY,
            clinic_name TEXT NOT NULL,
            phone TEXT,
            email TEXT,
            address TEXT,
            website TEXT,
            updated_at TEXT NOT NULL
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

fn create_user_roles_table(conn: &Connection) -> Result<(), String> {
    info!("Creating user_roles table if not exists");

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS user_roles (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            role TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (user_id, role)
        );
        CREATE INDEX IF NOT EXISTS idx_user_roles_user_id ON user_roles (user_id);",
    ).map_err(|e| format!("Failed to create user_roles: {}", e))?;

    Ok(())
}

fn create_comparison_report_deliveries_table(conn: &Connection) -> Result<(), String> {
    info!("Creating comparison_report_deliveries table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS comparison_report_deliveries (
            id TEXT PRIMARY KEY,
            tracking_id TEXT NOT NULL UNIQUE,
            episode_id TEXT,
            recipient_email TEXT NOT NULL,
            recipient_name TEXT,
            sent_at TEXT NOT NULL,
            open_count INTEGER NOT NULL DEFAULT 0,
            first_opened_at TEXT,
            last_opened_at TEXT,
            click_count INTEGER NOT NULL DEFAULT 0,
            first_clicked_at TEXT,
            last_clicked_at TEXT
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

fn create_notifications_history_table(conn: &Connection) -> Result<(), String> {
    info!("Creating notifications_history table if not exists");

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notifications_history (
            id TEXT PRIMARY KEY,
            notification_type TEXT NOT NULL,
            recipient_email TEXT NOT NULL,
            subject TEXT NOT NULL,
            status TEXT NOT NULL,
            provider_message_id TEXT,
            error_message TEXT,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_notifications_history_recipient
        ON notifications_history (recipient_email, created_at DESC);",
    ).map_err(|e| format!("Failed to create notifications_history: {}", e))?;

    Ok(())
}

fn create_contact_attempts_table(conn: &Connection) -> Result<(), String> {
    info!("Creating contact_attempts table if not exists");

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS contact_attempts (
            id TEXT PRIMARY KEY,
            lead_id TEXT NOT NULL,
            method TEXT NOT NULL,
            outcome TEXT NOT NULL,
            notes TEXT,
            attempted_by TEXT,
            attempted_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_contact_attempts_lead
        ON contact_attempts (lead_id, attempted_at DESC);",
    ).map_err(|e| format!("Failed to create contact_attempts: {}", e))?;

    Ok(())
}

fn create_primary_care_providers_table(conn: &Connection) -> Result<(), String> {
    info!("Creating primary_care_providers table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS primary_care_providers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            practice_name TEXT,
            phone TEXT,
            fax TEXT,
            email TEXT,
            city TEXT
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}
