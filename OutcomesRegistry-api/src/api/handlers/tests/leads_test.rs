#[cfg(test)]
mod leads_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use outcomes_registry_data::repository::ProviderRepository;
    use outcomes_registry_domain::debounce::Debouncer;
    use outcomes_registry_domain::services::providers::ProviderLookupService;
    use serde_json::json;

    use super::super::{as_json, get_request, json_request, send, test_app, test_state};
    use crate::api::state::AppState;

    fn fast_provider_state() -> AppState {
        let service = ProviderLookupService::new(ProviderRepository::new(), Debouncer::new(Duration::from_millis(10)));
        test_state().with_providers(Arc::new(service))
    }

    #[tokio::test]
    async fn test_contact_attempts_are_logged_and_listed() {
        let state = test_state();

        let (status, _, body) = send(
            test_app(state.clone()),
            json_request(
                "POST",
                "/api/v1/leads/lead-1/contact-attempts",
                json!({ "method": "phone", "outcome": "left_message", "notes": "Left voicemail at 9am" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created = as_json(&body);
        assert_eq!(created["lead_id"], "lead-1");
        assert_eq!(created["outcome"], "left_message");

        let (status, _, body) = send(test_app(state.clone()), get_request("/api/v1/leads/lead-1/contact-attempts")).await;
        assert_eq!(status, StatusCode::OK);
        let listed = as_json(&body);
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["id"], created["id"]);

        let (_, _, body) = send(test_app(state), get_request("/api/v1/leads/lead-2/contact-attempts")).await;
        assert_eq!(as_json(&body), json!([]));
    }

    #[tokio::test]
    async fn test_unknown_contact_method_is_rejected() {
        let (status, _, body) = send(
            test_app(test_state()),
            json_request(
                "POST",
                "/api/v1/leads/lead-1/contact-attempts",
                json!({ "method": "pigeon", "outcome": "reached" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(as_json(&body)["message"].as_str().unwrap().contains("pigeon"));
    }

    #[tokio::test]
    async fn test_provider_search_finds_added_provider() {
        let state = fast_provider_state();

        let (status, _, body) = send(
            test_app(state.clone()),
            json_request(
                "POST",
                "/api/v1/providers",
                json!({ "name": "Dr. Maria Alvarez", "practice_name": "Lakeside Family Medicine", "city": "Duluth" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(as_json(&body)["id"].is_string());

        let (status, _, body) = send(
            test_app(state),
            get_request("/api/v1/providers/search?q=lakeside&client_key=desk-1"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let json = as_json(&body);
        assert_eq!(json["superseded"], false);
        assert_eq!(json["results"][0]["name"], "Dr. Maria Alvarez");
    }

    #[tokio::test]
    async fn test_short_provider_query_returns_nothing() {
        let (status, _, body) = send(test_app(fast_provider_state()), get_request("/api/v1/providers/search?q=a")).await;

        assert_eq!(status, StatusCode::OK);
        let json = as_json(&body);
        assert_eq!(json["superseded"], false);
        assert_eq!(json["results"], json!([]));
    }

    #[tokio::test]
    async fn test_provider_requires_name() {
        let (status, _, _) = send(
            test_app(fast_provider_state()),
            json_request("POST", "/api/v1/providers", json!({ "name": "  " })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
