use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use outcomes_registry_domain::entities::delivery::{CreateDeliveryRequest, DeliveryTracking};
use outcomes_registry_domain::services::tracking::TrackingLinks;

/// Request payload for registering an outbound comparison report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDeliveryPayload {
    /// Episode the report belongs to
    pub episode_id: Option<String>,

    #[validate(email(message = "Must be a valid email address"))]
    pub recipient_email: String,

    pub recipient_name: Option<String>,
}

impl From<CreateDeliveryPayload> for CreateDeliveryRequest {
    fn from(payload: CreateDeliveryPayload) -> Self {
        Self {
            episode_id: payload.episode_id,
            recipient_email: payload.recipient_email,
            recipient_name: payload.recipient_name,
        }
    }
}

/// Public representation of a tracked delivery
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryResponse {
    pub id: String,
    pub tracking_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_id: Option<String>,
    pub recipient_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    pub sent_at: DateTime<Utc>,
    pub open_count: u64,
    pub click_count: u64,

    /// Embed as `<img src>` in the report email
    pub pixel_url: String,

    /// Prefix for tracked links; append `&url=<percent-encoded target>`
    pub click_url: String,
}

impl DeliveryResponse {
    pub fn new(delivery: DeliveryTracking, links: TrackingLinks) -> Self {
        Self {
            id: delivery.id,
            tracking_id: delivery.tracking_id,
            episode_id: delivery.episode_id,
            recipient_email: delivery.recipient_email,
            recipient_name: delivery.recipient_name,
            sent_at: delivery.sent_at,
            open_count: delivery.open_count,
            click_count: delivery.click_count,
            pixel_url: links.pixel_url,
            click_url: links.click_url,
        }
    }
}
