#[cfg(test)]
mod intake_tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::json;

    use super::super::{as_json, get_request, json_request, send, test_app, test_state};

    #[tokio::test]
    async fn test_classify_prefers_category() {
        let (status, _, body) = send(
            test_app(test_state()),
            json_request(
                "POST",
                "/api/v1/intake/classify",
                json!({ "category": "Neurological", "concern": "knee pain" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body)["episode_type"], "NEURO");
    }

    #[tokio::test]
    async fn test_classify_from_concern_and_empty_intake() {
        let (_, _, body) = send(
            test_app(test_state()),
            json_request("POST", "/api/v1/intake/classify", json!({ "concern": "Sprained ankle" })),
        )
        .await;
        assert_eq!(as_json(&body)["episode_type"], "MSK");

        let (status, _, body) = send(
            test_app(test_state()),
            json_request("POST", "/api/v1/intake/classify", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body)["episode_type"], "UNKNOWN");
    }

    #[tokio::test]
    async fn test_mcid_evaluation() {
        let (status, _, body) = send(
            test_app(test_state()),
            json_request(
                "POST",
                "/api/v1/outcomes/mcid",
                json!({ "baseline": 20, "final": 10, "index_type": "NDI" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json = as_json(&body);
        assert_eq!(json["mcid_achieved"], true);
        assert_eq!(json["improvement"], 10.0);
        assert_eq!(json["mcid_threshold"], 7.5);
    }

    #[tokio::test]
    async fn test_mcid_below_threshold() {
        let (_, _, body) = send(
            test_app(test_state()),
            json_request(
                "POST",
                "/api/v1/outcomes/mcid",
                json!({ "baseline": 20, "final": 15, "index_type": "ndi" }),
            ),
        )
        .await;

        assert_eq!(as_json(&body)["mcid_achieved"], false);
    }

    #[tokio::test]
    async fn test_mcid_requires_scores() {
        let (status, _, body) = send(
            test_app(test_state()),
            json_request("POST", "/api/v1/outcomes/mcid", json!({ "index_type": "NDI" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(as_json(&body)["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_cors_preflight_is_answered() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/send-approval-email")
            .header(header::ORIGIN, "https://portal.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,apikey")
            .body(Body::empty())
            .unwrap();

        let (status, headers, _) = send(test_app(test_state()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap();
        assert!(allowed.contains("apikey"));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (status, _, body) = send(test_app(test_state()), get_request("/api-docs/openapi.json")).await;

        assert_eq!(status, StatusCode::OK);
        let doc = as_json(&body);
        assert!(doc["paths"]["/track/open"].is_object());
        assert!(doc["paths"]["/api/v1/outcomes/mcid"].is_object());
    }
}
