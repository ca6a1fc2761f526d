#[cfg(test)]
mod email_tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use outcomes_registry_data::repository::{
        ClinicSettingsRepository, NotificationRepository, NotificationRepositoryTrait,
    };
    use outcomes_registry_domain::services::EmailService;
    use outcomes_registry_domain::testing::{FailingEmailProvider, RecordingEmailProvider};
    use serde_json::json;

    use super::super::{as_json, json_request, send, test_app, test_state};

    #[tokio::test]
    async fn test_approval_email_is_sent_and_logged() {
        let provider = RecordingEmailProvider::new();
        let notifications = NotificationRepository::new();
        let service = EmailService::new(provider.clone(), notifications.clone(), ClinicSettingsRepository::new())
            .with_from_address("Test Clinic <noreply@clinic.test>");
        let state = test_state().with_email(Arc::new(service));

        let (status, _, body) = send(
            test_app(state),
            json_request(
                "POST",
                "/send-approval-email",
                json!({
                    "email": "lead@example.com",
                    "name": "Sam Rivera",
                    "clinic_name": "Harbor Physio",
                    "appointment_details": "Monday 10:30"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json = as_json(&body);
        assert_eq!(json["success"], true);
        assert_eq!(json["id"], "mock-email-1");

        let sent = provider.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["lead@example.com".to_string()]);
        assert!(sent[0].subject.contains("Harbor Physio"));
        assert!(sent[0].html.contains("Monday 10:30"));

        let history = notifications.list_for_recipient("lead@example.com").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, "sent");
    }

    #[tokio::test]
    async fn test_decline_email_uses_default_clinic_name() {
        let provider = RecordingEmailProvider::new();
        let service = EmailService::new(provider.clone(), NotificationRepository::new(), ClinicSettingsRepository::new())
            .with_from_address("noreply@clinic.test");
        let state = test_state().with_email(Arc::new(service));

        let (status, _, _) = send(
            test_app(state),
            json_request("POST", "/send-decline-email", json!({ "email": "lead@example.com", "name": "Sam" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(provider.sent()[0].subject.ends_with("our clinic"));
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let (status, _, body) = send(
            test_app(test_state()),
            json_request("POST", "/send-approval-email", json!({ "email": "not-an-email", "name": "Sam" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(as_json(&body)["error"].as_str().unwrap().contains("email"));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let (status, _, body) = send(
            test_app(test_state()),
            json_request("POST", "/send-approval-email", json!({ "email": "lead@example.com", "name": "   " })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(as_json(&body)["error"], "name: Name is required");
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let (status, _, body) = send(
            test_app(test_state()),
            json_request("POST", "/send-decline-email", json!({ "email": "lead@example.com" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(as_json(&body)["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/send-approval-email")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, _, body) = send(test_app(test_state()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(as_json(&body)["error"].is_string());
    }

    #[tokio::test]
    async fn test_provider_failure_returns_500() {
        let notifications = NotificationRepository::new();
        let service = EmailService::new(
            FailingEmailProvider::new("domain is not verified"),
            notifications.clone(),
            ClinicSettingsRepository::new(),
        )
        .with_from_address("noreply@clinic.test");
        let state = test_state().with_email(Arc::new(service));

        let (status, _, body) = send(
            test_app(state),
            json_request("POST", "/send-approval-email", json!({ "email": "lead@example.com", "name": "Sam" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(as_json(&body)["error"].as_str().unwrap().contains("domain is not verified"));

        let history = notifications.list_for_recipient("lead@example.com").await.unwrap();
        assert_eq!(history[0].status, "failed");
    }

    #[tokio::test]
    async fn test_public_client_id_follows_environment() {
        std::env::remove_var("PUBLIC_CLIENT_ID");
        let request = || json_request("POST", "/get-public-client-id", json!({}));

        let (status, _, body) = send(test_app(test_state()), request()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(as_json(&body)["error"].is_string());

        std::env::set_var("PUBLIC_CLIENT_ID", "pk_test_123");
        let (status, _, body) = send(test_app(test_state()), request()).await;
        std::env::remove_var("PUBLIC_CLIENT_ID");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body)["client_id"], "pk_test_123");
    }
}
