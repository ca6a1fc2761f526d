use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use outcomes_registry_data::models::delivery::NewComparisonReportDelivery;
use outcomes_registry_data::repository::{DeliveryRepository, DeliveryRepositoryTrait, RepositoryError};

use crate::entities::conversions::{convert_to_data_engagement, convert_to_domain_delivery};
use crate::entities::delivery::{CreateDeliveryRequest, DeliveryTracking};

/// 1x1 transparent GIF served for every open
pub static TRACKING_PIXEL: Lazy<Vec<u8>> = Lazy::new(|| {
    STANDARD
        .decode("R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7")
        .unwrap_or_default()
});

/// Tracking errors
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Missing or blank tracking id
    #[error("Invalid tracking id: {0}")]
    InvalidTrackingId(String),

    /// No delivery with that tracking id
    #[error("Delivery not found: {0}")]
    NotFound(String),

    /// Tracking id already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for TrackingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => TrackingError::NotFound(msg),
            RepositoryError::Conflict(msg) => TrackingError::Conflict(msg),
            RepositoryError::Validation(msg) => TrackingError::InvalidTrackingId(msg),
            other => TrackingError::Repository(other.to_string()),
        }
    }
}

/// Public URLs embedded in an outbound report
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingLinks {
    pub pixel_url: String,
    /// Click redirect prefix; the caller appends `&url=<encoded target>`
    pub click_url: String,
}

impl TrackingLinks {
    pub fn for_tracking_id(base_url: &str, tracking_id: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let id = urlencoding::encode(tracking_id);
        Self {
            pixel_url: format!("{}/track/open?tracking_id={}", base, id),
            click_url: format!("{}/track/click?id={}", base, id),
        }
    }
}

/// Where a click should land. Only absolute http(s) targets are honoured;
/// anything else goes to `fallback`.
pub fn resolve_click_target(raw: Option<&str>, fallback: &str) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return fallback.to_string();
    };

    // Links are sometimes encoded twice by mail clients. A target that
    // already parses keeps its own encoding, nested query values included.
    let parsed = Url::parse(raw).or_else(|e| match urlencoding::decode(raw) {
        Ok(decoded) if decoded != raw => Url::parse(&decoded),
        _ => Err(e),
    });

    match parsed {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url.to_string(),
        Ok(url) => {
            warn!("Refusing click redirect to scheme {}", url.scheme());
            fallback.to_string()
        },
        Err(e) => {
            warn!("Unparseable click target '{}': {}", raw, e);
            fallback.to_string()
        }
    }
}

/// Trait for email engagement tracking
#[async_trait]
pub trait TrackingServiceTrait: Send + Sync {
    /// Register a delivery and hand out its tracking id
    async fn create_delivery(&self, request: CreateDeliveryRequest) -> Result<DeliveryTracking, TrackingError>;

    /// Count a pixel load
    async fn record_open(&self, tracking_id: &str) -> Result<DeliveryTracking, TrackingError>;

    /// Count a link click
    async fn record_click(&self, tracking_id: &str) -> Result<DeliveryTracking, TrackingError>;
}

#[derive(Debug, Clone, Copy)]
enum Engagement {
    Open,
    Click,
}

/// Tracking service for domain logic
pub struct TrackingService<R: DeliveryRepositoryTrait> {
    repository: R,
}

impl<R: DeliveryRepositoryTrait> TrackingService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Read, bump and write back. Concurrent hits on one delivery may lose an
    /// increment; engagement counts are advisory.
    async fn register(&self, tracking_id: &str, kind: Engagement) -> Result<DeliveryTracking, TrackingError> {
        let tracking_id = tracking_id.trim();
        if tracking_id.is_empty() {
            return Err(TrackingError::InvalidTrackingId("tracking id is required".to_string()));
        }

        let row = self
            .repository
            .get_by_tracking_id(tracking_id)
            .await?
            .ok_or_else(|| TrackingError::NotFound(tracking_id.to_string()))?;

        let mut delivery = convert_to_domain_delivery(row).map_err(TrackingError::Repository)?;
        let now = Utc::now();
        match kind {
            Engagement::Open => delivery.register_open(now),
            Engagement::Click => delivery.register_click(now),
        }

        self.repository
            .update_engagement(&delivery.id, &convert_to_data_engagement(&delivery))
            .await?;

        debug!(
            "Delivery {} now has {} opens and {} clicks",
            delivery.tracking_id, delivery.open_count, delivery.click_count
        );
        Ok(delivery)
    }
}

#[async_trait]
impl<R: DeliveryRepositoryTrait> TrackingServiceTrait for TrackingService<R> {
    async fn create_delivery(&self, request: CreateDeliveryRequest) -> Result<DeliveryTracking, TrackingError> {
        if request.recipient_email.trim().is_empty() {
            return Err(TrackingError::InvalidTrackingId("recipient email is required".to_string()));
        }

        let new = NewComparisonReportDelivery {
            tracking_id: Uuid::new_v4().to_string(),
            episode_id: request.episode_id,
            recipient_email: request.recipient_email.trim().to_string(),
            recipient_name: request.recipient_name,
            sent_at: Utc::now().to_rfc3339(),
        };

        let row = self.repository.create(new).await?;
        info!("Registered comparison report delivery {}", row.tracking_id);
        convert_to_domain_delivery(row).map_err(TrackingError::Repository)
    }

    async fn record_open(&self, tracking_id: &str) -> Result<DeliveryTracking, TrackingError> {
        self.register(tracking_id, Engagement::Open).await
    }

    async fn record_click(&self, tracking_id: &str) -> Result<DeliveryTracking, TrackingError> {
        self.register(tracking_id, Engagement::Click).await
    }
}

/// Tracking service over the default delivery repository
pub fn create_default_tracking_service() -> TrackingService<DeliveryRepository> {
    TrackingService::new(DeliveryRepository::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use outcomes_registry_data::models::delivery::{ComparisonReportDelivery, DeliveryEngagement};

    struct BrokenRepository;

    #[async_trait]
    impl DeliveryRepositoryTrait for BrokenRepository {
        async fn create(&self, _new: NewComparisonReportDelivery) -> Result<ComparisonReportDelivery, RepositoryError> {
            Err(RepositoryError::Lock("poisoned".to_string()))
        }

        async fn get_by_tracking_id(&self, _tracking_id: &str) -> Result<Option<ComparisonReportDelivery>, RepositoryError> {
            Err(RepositoryError::Lock("poisoned".to_string()))
        }

        async fn update_engagement(&self, _id: &str, _engagement: &DeliveryEngagement) -> Result<(), RepositoryError> {
            Err(RepositoryError::Lock("poisoned".to_string()))
        }
    }

    fn request() -> CreateDeliveryRequest {
        CreateDeliveryRequest {
            episode_id: Some("ep-1".to_string()),
            recipient_email: "pcp@example.com".to_string(),
            recipient_name: Some("Dr. Lee".to_string()),
        }
    }

    #[test]
    fn test_pixel_is_a_gif() {
        assert_eq!(TRACKING_PIXEL.len(), 42);
        assert_eq!(&TRACKING_PIXEL[..6], b"GIF89a");
    }

    #[tokio::test]
    async fn test_opens_and_clicks_accumulate() {
        let service = TrackingService::new(DeliveryRepository::new());
        let delivery = service.create_delivery(request()).await.unwrap();
        assert_eq!(delivery.open_count, 0);

        service.record_open(&delivery.tracking_id).await.unwrap();
        let after_second = service.record_open(&delivery.tracking_id).await.unwrap();
        let after_click = service.record_click(&delivery.tracking_id).await.unwrap();

        assert_eq!(after_second.open_count, 2);
        assert_eq!(after_click.open_count, 2);
        assert_eq!(after_click.click_count, 1);
        assert!(after_click.first_opened_at.unwrap() <= after_click.last_opened_at.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_and_blank_ids() {
        let service = TrackingService::new(DeliveryRepository::new());
        assert!(matches!(service.record_open("nope").await, Err(TrackingError::NotFound(_))));
        assert!(matches!(service.record_click("  ").await, Err(TrackingError::InvalidTrackingId(_))));
    }

    #[tokio::test]
    async fn test_repository_failure_surfaces() {
        let service = TrackingService::new(BrokenRepository);
        assert!(matches!(service.record_open("abc").await, Err(TrackingError::Repository(_))));
    }

    #[test]
    fn test_click_targets() {
        let fallback = "https://clinic.example";
        assert_eq!(
            resolve_click_target(Some("https://portal.example/report/1"), fallback),
            "https://portal.example/report/1"
        );
        assert_eq!(
            resolve_click_target(Some("https%3A%2F%2Fportal.example%2Fr"), fallback),
            "https://portal.example/r"
        );
        assert_eq!(resolve_click_target(Some("javascript:alert(1)"), fallback), fallback);
        assert_eq!(resolve_click_target(Some("/relative"), fallback), fallback);
        assert_eq!(resolve_click_target(None, fallback), fallback);
    }

    #[test]
    fn test_click_target_keeps_nested_encoding() {
        let fallback = "https://clinic.example";
        let target = "https://portal.example/login?next=https%3A%2F%2Fapp.example%2Fr%3Fa%3D1%26b%3D2&x=1";
        assert_eq!(resolve_click_target(Some(target), fallback), target);

        let url = Url::parse(&resolve_click_target(Some(target), fallback)).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("next".to_string(), "https://app.example/r?a=1&b=2".to_string()),
                ("x".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_links() {
        let links = TrackingLinks::for_tracking_id("https://api.example/", "t-1");
        assert_eq!(links.pixel_url, "https://api.example/track/open?tracking_id=t-1");
        assert_eq!(links.click_url, "https://api.example/track/click?id=t-1");
    }
}
