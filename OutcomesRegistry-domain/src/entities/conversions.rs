use chrono::{DateTime, Utc};
use tracing::warn;

use outcomes_registry_data::models::contact_attempt::ContactAttempt as DataContactAttempt;
use outcomes_registry_data::models::delivery::{
    ComparisonReportDelivery, DeliveryEngagement,
};
use outcomes_registry_data::models::provider::PrimaryCareProvider as DataProvider;

use crate::entities::contact::ContactAttempt;
use crate::entities::delivery::DeliveryTracking;
use crate::entities::provider::PrimaryCareProvider;

/// Conversion functions between domain entities and data models.
/// They follow the pattern convert_to_[target_layer]_[model_name].

/// Parse a stored RFC 3339 timestamp
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{}': {}", value, e))
}

/// Parse an optional stored timestamp; unparseable values are logged and dropped
fn parse_optional_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value.and_then(|v| match parse_timestamp(v) {
        Ok(dt) => Some(dt),
        Err(e) => {
            warn!("Ignoring stored timestamp: {}", e);
            None
        }
    })
}

/// Convert a delivery row into the domain entity
pub fn convert_to_domain_delivery(row: ComparisonReportDelivery) -> Result<DeliveryTracking, String> {
    Ok(DeliveryTracking {
        sent_at: parse_timestamp(&row.sent_at)?,
        first_opened_at: parse_optional_timestamp(row.first_opened_at.as_deref()),
        last_opened_at: parse_optional_timestamp(row.last_opened_at.as_deref()),
        first_clicked_at: parse_optional_timestamp(row.first_clicked_at.as_deref()),
        last_clicked_at: parse_optional_timestamp(row.last_clicked_at.as_deref()),
        open_count: row.open_count.max(0) as u64,
        click_count: row.click_count.max(0) as u64,
        id: row.id,
        tracking_id: row.tracking_id,
        episode_id: row.episode_id,
        recipient_email: row.recipient_email,
        recipient_name: row.recipient_name,
    })
}

/// Engagement columns to write back for a delivery
pub fn convert_to_data_engagement(delivery: &DeliveryTracking) -> DeliveryEngagement {
    DeliveryEngagement {
        open_count: i64::try_from(delivery.open_count).unwrap_or(i64::MAX),
        first_opened_at: delivery.first_opened_at.map(|dt| dt.to_rfc3339()),
        last_opened_at: delivery.last_opened_at.map(|dt| dt.to_rfc3339()),
        click_count: i64::try_from(delivery.click_count).unwrap_or(i64::MAX),
        first_clicked_at: delivery.first_clicked_at.map(|dt| dt.to_rfc3339()),
        last_clicked_at: delivery.last_clicked_at.map(|dt| dt.to_rfc3339()),
    }
}

/// Convert a contact attempt row into the domain entity
pub fn convert_to_domain_contact_attempt(row: DataContactAttempt) -> Result<ContactAttempt, String> {
    Ok(ContactAttempt {
        method: row.method.parse()?,
        outcome: row.outcome.parse()?,
        attempted_at: parse_timestamp(&row.attempted_at)?,
        id: row.id,
        lead_id: row.lead_id,
        notes: row.notes,
        attempted_by: row.attempted_by,
    })
}

/// Convert a provider row into the domain entity
pub fn convert_to_domain_provider(row: DataProvider) -> PrimaryCareProvider {
    PrimaryCareProvider {
        id: row.id,
        name: row.name,
        practice_name: row.practice_name,
        phone: row.phone,
        fax: row.fax,
        email: row.email,
        city: row.city,
    }
}

/// Convert a domain provider into the storage row
pub fn convert_to_data_provider(provider: &PrimaryCareProvider) -> DataProvider {
    DataProvider {
        id: provider.id.clone(),
        name: provider.name.clone(),
        practice_name: provider.practice_name.clone(),
        phone: provider.phone.clone(),
        fax: provider.fax.clone(),
        email: provider.email.clone(),
        city: provider.city.clone(),
    }
}
