use serde::{Deserialize, Serialize};

/// Storage model for a row of `comparison_report_deliveries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReportDelivery {
    /// Primary key
    pub id: String,

    /// Opaque identifier embedded in pixel and click URLs
    pub tracking_id: String,

    /// Episode the report was generated for
    pub episode_id: Option<String>,

    /// Address the report was sent to
    pub recipient_email: String,

    /// Display name of the recipient
    pub recipient_name: Option<String>,

    /// When the report went out (RFC 3339)
    pub sent_at: String,

    pub open_count: i64,
    pub first_opened_at: Option<String>,
    pub last_opened_at: Option<String>,

    pub click_count: i64,
    pub first_clicked_at: Option<String>,
    pub last_clicked_at: Option<String>,
}

/// Input data for creating a delivery row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComparisonReportDelivery {
    pub tracking_id: String,
    pub episode_id: Option<String>,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
    pub sent_at: String,
}

/// Engagement counters written back after an open or click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryEngagement {
    pub open_count: i64,
    pub first_opened_at: Option<String>,
    pub last_opened_at: Option<String>,
    pub click_count: i64,
    pub first_clicked_at: Option<String>,
    pub last_clicked_at: Option<String>,
}

impl ComparisonReportDelivery {
    /// Build a fresh row with zeroed counters
    pub fn from_new(id: String, new: NewComparisonReportDelivery) -> Self {
        Self {
            id,
            tracking_id: new.tracking_id,
            episode_id: new.episode_id,
            recipient_email: new.recipient_email,
            recipient_name: new.recipient_name,
            sent_at: new.sent_at,
            open_count: 0,
            first_opened_at: None,
            last_opened_at: None,
            click_count: 0,
            first_clicked_at: None,
            last_clicked_at: None,
        }
    }

    /// Overwrite the engagement columns
    pub fn apply_engagement(&mut self, engagement: &DeliveryEngagement) {
        self.open_count = engagement.open_count;
        self.first_opened_at = engagement.first_opened_at.clone();
        self.last_opened_at = engagement.last_opened_at.clone();
        self.click_count = engagement.click_count;
        self.first_clicked_at = engagement.first_clicked_at.clone();
        self.last_clicked_at = engagement.last_clicked_at.clone();
    }
}
