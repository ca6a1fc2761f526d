use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked comparison report delivery and its engagement counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTracking {
    pub id: String,
    pub tracking_id: String,
    pub episode_id: Option<String>,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
    pub sent_at: DateTime<Utc>,
    pub open_count: u64,
    pub first_opened_at: Option<DateTime<Utc>>,
    pub last_opened_at: Option<DateTime<Utc>>,
    pub click_count: u64,
    pub first_clicked_at: Option<DateTime<Utc>>,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl DeliveryTracking {
    /// Count an open. The first-open time is set once and never moves.
    pub fn register_open(&mut self, at: DateTime<Utc>) {
        self.open_count = self.open_count.saturating_add(1);
        self.first_opened_at.get_or_insert(at);
        self.last_opened_at = Some(at);
    }

    /// Count a click. The first-click time is set once and never moves.
    pub fn register_click(&mut self, at: DateTime<Utc>) {
        self.click_count = self.click_count.saturating_add(1);
        self.first_clicked_at.get_or_insert(at);
        self.last_clicked_at = Some(at);
    }
}

/// Request to register an outbound comparison report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeliveryRequest {
    pub episode_id: Option<String>,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
}
