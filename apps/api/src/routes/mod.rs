pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Credential
        .route(
            "/api/v1/credential",
            get(handlers::handle_credential_status).put(handlers::handle_set_credential),
        )
        // Assistant
        .route("/api/v1/assistant/chat", post(handlers::handle_chat))
        .route(
            "/api/v1/assistant/cover-letter",
            post(handlers::handle_cover_letter),
        )
        .route(
            "/api/v1/assistant/improve-section",
            post(handlers::handle_improve_section),
        )
        .route(
            "/api/v1/assistant/interview-questions",
            post(handlers::handle_interview_questions),
        )
        .route(
            "/api/v1/assistant/skill-suggestions",
            post(handlers::handle_skill_suggestions),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::assistant::service::tests::{assistant_with, Reply, SpyTransport};
    use crate::credentials::{CredentialStore, MemoryCredentialStore, CREDENTIAL_KEY};

    fn router(
        reply: Reply,
        configured: Option<&str>,
    ) -> (Router, Arc<SpyTransport>, Arc<MemoryCredentialStore>) {
        let transport = SpyTransport::new(reply);
        let store = Arc::new(MemoryCredentialStore::new());
        let assistant = assistant_with(transport.clone(), store.clone(), configured);
        let state = AppState {
            assistant: Arc::new(assistant),
        };
        (build_router(state), transport, store)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _, _) = router(Reply::Echo, None);
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_chat_without_credential_is_precondition_failed() {
        let (app, transport, _) = router(Reply::Echo, None);
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/assistant/chat",
                json!({ "message": "Review my CV" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
        assert_eq!(read_json(response).await["error"]["code"], "CREDENTIAL_MISSING");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_set_credential_then_status() {
        let (app, _, store) = router(Reply::Echo, None);

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/api/v1/credential",
                json!({ "api_key": "abc" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.get(CREDENTIAL_KEY).unwrap().as_deref(), Some("abc"));

        let response = app
            .oneshot(Request::get("/api/v1/credential").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(read_json(response).await["configured"], true);
    }

    #[tokio::test]
    async fn test_empty_api_key_is_rejected() {
        let (app, _, store) = router(Reply::Echo, None);
        let response = app
            .oneshot(json_request(
                Method::PUT,
                "/api/v1/credential",
                json!({ "api_key": "  " }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.get(CREDENTIAL_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_chat_with_cv_returns_generated_text() {
        let (app, _, _) = router(Reply::Echo, Some("key"));
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/assistant/chat",
                json!({
                    "message": "What is missing?",
                    "cv": {
                        "title": "Analyst",
                        "sections": [
                            { "id": "1", "type": "skills", "title": "Skills", "visible": true,
                              "content": { "skills": ["Python", "SQL"] } }
                        ]
                    }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = read_json(response).await["text"].as_str().unwrap().to_string();
        assert!(text.contains("Python, SQL"));
    }

    #[tokio::test]
    async fn test_remote_failure_maps_to_bad_gateway_with_service_message() {
        let (app, _, _) = router(
            Reply::Fixed(
                429,
                json!({ "error": { "message": "quota exceeded" } }).to_string(),
            ),
            Some("key"),
        );
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/assistant/skill-suggestions",
                json!({}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "REMOTE_SERVICE_ERROR");
        assert_eq!(body["error"]["message"], "quota exceeded");
    }

    #[tokio::test]
    async fn test_improve_section_requires_section_type() {
        let (app, transport, _) = router(Reply::Echo, Some("key"));
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/assistant/improve-section",
                json!({ "section_type": "", "current_content": "text" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(transport.call_count(), 0);
    }
}
