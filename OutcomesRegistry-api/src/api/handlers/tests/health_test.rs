#[cfg(test)]
mod health_tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use outcomes_registry_domain::health::ComponentStatus;
    use outcomes_registry_domain::testing::MockHealthService;

    use super::super::{as_json, get_request, send, test_app_with_health, test_state};

    #[tokio::test]
    async fn test_healthy_service_returns_ok() {
        let app = test_app_with_health(test_state(), Arc::new(MockHealthService::new()));
        let (status, _, body) = send(app, get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        let json = as_json(&body);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["environment"], "test");
        assert_eq!(json["components"]["database"]["status"], "ok");
        assert!(json["response_time_ms"].is_u64());
        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_degraded_database_returns_503() {
        let health = MockHealthService::new().with_degraded_database();
        let app = test_app_with_health(test_state(), Arc::new(health));
        let (status, _, body) = send(app, get_request("/health")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let json = as_json(&body);
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["components"]["database"]["status"], "degraded");
    }

    #[tokio::test]
    async fn test_unhealthy_database_returns_500() {
        let health = MockHealthService::new().with_unhealthy_database();
        let app = test_app_with_health(test_state(), Arc::new(health));
        let (status, _, body) = send(app, get_request("/health")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(as_json(&body)["components"]["database"]["message"], "Database connection failed");
    }

    #[tokio::test]
    async fn test_additional_components_are_reported() {
        let health = MockHealthService::new().with_component(
            "email",
            ComponentStatus::Degraded,
            Some("provider slow".to_string()),
        );
        let app = test_app_with_health(test_state(), Arc::new(health));
        let (status, _, body) = send(app, get_request("/health")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(as_json(&body)["components"]["additional"]["email"]["status"], "degraded");
    }
}
