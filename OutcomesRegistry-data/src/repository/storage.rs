use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::clinic::ClinicSettings;
use crate::models::contact_attempt::ContactAttempt;
use crate::models::delivery::{ComparisonReportDelivery, DeliveryEngagement};
use crate::models::notification::NotificationRecord;
use crate::models::provider::PrimaryCareProvider;
use crate::models::user::{Profile, UserRoleRecord};
use super::errors::RepositoryError;

const DELIVERY_COLUMNS: &str = "id, tracking_id, episode_id, recipient_email, recipient_name, sent_at,
     open_count, first_opened_at, last_opened_at, click_count, first_clicked_at, last_clicked_at";

/// Escape `LIKE` wildcards so user text only ever matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Database storage operations for every registry table
pub struct DatabaseStorage;

fn delivery_from_row(row: &Row<'_>) -> rusqlite::Result<ComparisonReportDelivery> {
    Ok(ComparisonReportDelivery {
        id: row.get(0)?,
        tracking_id: row.get(1)?,
        episode_id: row.get(2)?,
        recipient_email: row.get(3)?,
        recipient_name: row.get(4)?,
        sent_at: row.get(5)?,
        open_count: row.get(6)?,
        first_opened_at: row.get(7)?,
        last_opened_at: row.get(8)?,
        click_count: row.get(9)?,
        first_clicked_at: row.get(10)?,
        last_clicked_at: row.get(11)?,
    })
}

fn notification_from_row(row: &Row<'_>) -> rusqlite::Result<NotificationRecord> {
    Ok(NotificationRecord {
        id: row.get(0)?,
        notification_type: row.get(1)?,
        recipient_email: row.get(2)?,
        subject: row.get(3)?,
        status: row.get(4)?,
        provider_message_id: row.get(5)?,
        error_message: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn contact_attempt_from_row(row: &Row<'_>) -> rusqlite::Result<ContactAttempt> {
    Ok(ContactAttempt {
        id: row.get(0)?,
        lead_id: row.get(1)?,
        method: row.get(2)?,
        outcome: row.get(3)?,
        notes: row.get(4)?,
        attempted_by: row.get(5)?,
        attempted_at: row.get(6)?,
    })
}

fn provider_from_row(row: &Row<'_>) -> rusqlite::Result<PrimaryCareProvider> {
    Ok(PrimaryCareProvider {
        id: row.get(0)?,
        name: row.get(1)?,
        practice_name: row.get(2)?,
        phone: row.get(3)?,
        fax: row.get(4)?,
        email: row.get(5)?,
        city: row.get(6)?,
    })
}

/// Map unique-constraint failures to `Conflict`, everything else to `Sqlite`
fn map_insert_error(err: rusqlite::Error, what: &str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            RepositoryError::Conflict(format!("{} already exists", what))
        }
        other => RepositoryError::Sqlite(other),
    }
}

impl DatabaseStorage {
    /// Insert a delivery row
    pub fn insert_delivery(pool: &DatabasePool, delivery: &ComparisonReportDelivery) -> Result<(), RepositoryError> {
        debug!("Storing comparison report delivery: id={}", delivery.id);
        let conn = pool.connection()?;

        conn.execute(
            "INSERT INTO comparison_report_deliveries
             (id, tracking_id, episode_id, recipient_email, recipient_name, sent_at,
              open_count, first_opened_at, last_opened_at, click_count, first_clicked_at, last_clicked_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                delivery.id,
                delivery.tracking_id,
                delivery.episode_id,
                delivery.recipient_email,
                delivery.recipient_name,
                delivery.sent_at,
                delivery.open_count,
                delivery.first_opened_at,
                delivery.last_opened_at,
                delivery.click_count,
                delivery.first_clicked_at,
                delivery.last_clicked_at,
            ],
        ).map_err(|e| map_insert_error(e, "tracking id"))?;

        Ok(())
    }

    /// Look up a delivery by its tracking identifier
    pub fn get_delivery_by_tracking_id(
        pool: &DatabasePool,
        tracking_id: &str,
    ) -> Result<Option<ComparisonReportDelivery>, RepositoryError> {
        debug!("Getting delivery by tracking id: {}", tracking_id);
        let conn = pool.connection()?;

        let sql = format!(
            "SELECT {} FROM comparison_report_deliveries WHERE tracking_id = ?1",
            DELIVERY_COLUMNS
        );
        let delivery = conn
            .query_row(&sql, params![tracking_id], delivery_from_row)
            .optional()?;

        Ok(delivery)
    }

    /// Write the engagement counters of one delivery by primary key
    pub fn update_delivery_engagement(
        pool: &DatabasePool,
        id: &str,
        engagement: &DeliveryEngagement,
    ) -> Result<(), RepositoryError> {
        debug!("Updating delivery engagement: id={}", id);
        let conn = pool.connection()?;

        let changed = conn.execute(
            "UPDATE comparison_report_deliveries
             SET open_count = ?2, first_opened_at = ?3, last_opened_at = ?4,
                 click_count = ?5, first_clicked_at = ?6, last_clicked_at = ?7
             WHERE id = ?1",
            params![
                id,
                engagement.open_count,
                engagement.first_opened_at,
                engagement.last_opened_at,
                engagement.click_count,
                engagement.first_clicked_at,
                engagement.last_clicked_at,
            ],
        )?;

        if changed == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Append a notification history entry
    pub fn insert_notification(pool: &DatabasePool, record: &NotificationRecord) -> Result<(), RepositoryError> {
        debug!("Storing notification history entry: id={}", record.id);
        let conn = pool.connection()?;

        conn.execute(
            "INSERT INTO notifications_history
             (id, notification_type, recipient_email, subject, status, provider_message_id, error_message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id,
                record.notification_type,
                record.recipient_email,
                record.subject,
                record.status,
                record.provider_message_id,
                record.error_message,
                record.created_at,
            ],
        )?;

        Ok(())
    }

    /// History entries for one recipient, newest first
    pub fn list_notifications_for_recipient(
        pool: &DatabasePool,
        recipient_email: &str,
    ) -> Result<Vec<NotificationRecord>, RepositoryError> {
        let conn = pool.connection()?;

        let mut stmt = conn.prepare(
            "SELECT id, notification_type, recipient_email, subject, status, provider_message_id, error_message, created_at
             FROM notifications_history WHERE recipient_email = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map(params![recipient_email], notification_from_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Role names held by a user
    pub fn get_roles_for_user(pool: &DatabasePool, user_id: &str) -> Result<Vec<String>, RepositoryError> {
        debug!("Getting roles for user: {}", user_id);
        let conn = pool.connection()?;

        let mut stmt = conn.prepare("SELECT role FROM user_roles WHERE user_id = ?1 ORDER BY created_at")?;
        let rows = stmt.query_map(params![user_id], |row| row.get::<_, String>(0))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Grant a role; granting a role the user already holds is a no-op
    pub fn insert_user_role(pool: &DatabasePool, record: &UserRoleRecord) -> Result<UserRoleRecord, RepositoryError> {
        let conn = pool.connection()?;

        conn.execute(
            "INSERT OR IGNORE INTO user_roles (id, user_id, role, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![record.id, record.user_id, record.role, record.created_at],
        )?;

        let stored = conn.query_row(
            "SELECT id, user_id, role, created_at FROM user_roles WHERE user_id = ?1 AND role = ?2",
            params![record.user_id, record.role],
            |row| {
                Ok(UserRoleRecord {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    role: row.get(2)?,
                    created_at: row.get(3)?,
                })
            },
        )?;
        Ok(stored)
    }

    /// Get a profile by user id
    pub fn get_profile(pool: &DatabasePool, user_id: &str) -> Result<Option<Profile>, RepositoryError> {
        let conn = pool.connection()?;

        let profile = conn
            .query_row(
                "SELECT id, email, full_name, clinic_name, created_at FROM profiles WHERE id = ?1",
                params![user_id],
                |row| {
                    Ok(Profile {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        full_name: row.get(2)?,
                        clinic_name: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(profile)
    }

    /// Insert or replace a profile
    pub fn upsert_profile(pool: &DatabasePool, profile: &Profile) -> Result<(), RepositoryError> {
        let conn = pool.connection()?;

        conn.execute(
            "INSERT INTO profiles (id, email, full_name, clinic_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                full_name = excluded.full_name,
                clinic_name = excluded.clinic_name",
            params![profile.id, profile.email, profile.full_name, profile.clinic_name, profile.created_at],
        )?;

        Ok(())
    }

    /// The most recently updated clinic settings row
    pub fn get_current_clinic_settings(pool: &DatabasePool) -> Result<Option<ClinicSettings>, RepositoryError> {
        let conn = pool.connection()?;

        let settings = conn
            .query_row(
                "SELECT id, clinic_name, phone, email, address, website, updated_at
                 FROM clinic_settings ORDER BY updated_at DESC LIMIT 1",
                [],
                |row| {
                    Ok(ClinicSettings {
                        id: row.get(0)?,
                        clinic_name: row.get(1)?,
                        phone: row.get(2)?,
                        email: row.get(3)?,
                        address: row.get(4)?,
                        website: row.get(5)?,
                        updated_at: row.get(6)?,
                    })
                },
            )
            .optional()?;

        Ok(settings)
    }

    /// Insert or replace a clinic settings row
    pub fn upsert_clinic_settings(pool: &DatabasePool, settings: &ClinicSettings) -> Result<(), RepositoryError> {
        let conn = pool.connection()?;

        conn.execute(
            "INSERT OR REPLACE INTO clinic_settings (id, clinic_name, phone, email, address, website, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                settings.id,
                settings.clinic_name,
                settings.phone,
                settings.email,
                settings.address,
                settings.website,
                settings.updated_at,
            ],
        )?;

        Ok(())
    }

    /// Insert a contact attempt
    pub fn insert_contact_attempt(pool: &DatabasePool, attempt: &ContactAttempt) -> Result<(), RepositoryError> {
        debug!("Storing contact attempt for lead {}", attempt.lead_id);
        let conn = pool.connection()?;

        conn.execute(
            "INSERT INTO contact_attempts (id, lead_id, method, outcome, notes, attempted_by, attempted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                attempt.id,
                attempt.lead_id,
                attempt.method,
                attempt.outcome,
                attempt.notes,
                attempt.attempted_by,
                attempt.attempted_at,
            ],
        )?;

        Ok(())
    }

    /// Contact attempts for a lead, newest first
    pub fn list_contact_attempts(pool: &DatabasePool, lead_id: &str) -> Result<Vec<ContactAttempt>, RepositoryError> {
        let conn = pool.connection()?;

        let mut stmt = conn.prepare(
            "SELECT id, lead_id, method, outcome, notes, attempted_by, attempted_at
             FROM contact_attempts WHERE lead_id = ?1 ORDER BY attempted_at DESC",
        )?;
        let rows = stmt.query_map(params![lead_id], contact_attempt_from_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Insert a provider directory entry
    pub fn insert_provider(pool: &DatabasePool, provider: &PrimaryCareProvider) -> Result<(), RepositoryError> {
        let conn = pool.connection()?;

        conn.execute(
            "INSERT INTO primary_care_providers (id, name, practice_name, phone, fax, email, city)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                provider.id,
                provider.name,
                provider.practice_name,
                provider.phone,
                provider.fax,
                provider.email,
                provider.city,
            ],
        )?;

        Ok(())
    }

    /// Case-insensitive search by provider or practice name, ordered by name
    pub fn search_providers(
        pool: &DatabasePool,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PrimaryCareProvider>, RepositoryError> {
        debug!("Searching providers for '{}'", query);
        let conn = pool.connection()?;

        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
        let mut stmt = conn.prepare(
            "SELECT id, name, practice_name, phone, fax, email, city
             FROM primary_care_providers
             WHERE lower(name) LIKE ?1 ESCAPE '\\' OR lower(coalesce(practice_name, '')) LIKE ?1 ESCAPE '\\'
             ORDER BY name LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![pattern, limit as i64], provider_from_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }
}
