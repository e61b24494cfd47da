//! HTTP surface of the generation service.
//!
//! `POST /generate` takes `{"text", "api_key"}` and answers `{"mermaid_code"}`, or
//! `{"detail"}` with 400 (missing key), 422 (unreadable body) or 500 (provider failure).

mod error;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use autograph_core::{GenerationRequest, GenerationResponse};
use autograph_generate::Generator;

pub use error::ApiError;

/// Shared, read-only handler state. Requests never write to it.
#[derive(Clone)]
pub struct AppState {
    generator: Generator,
}

pub fn router(generator: Generator) -> Router {
    Router::new()
        .route("/generate", post(generate))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { generator })
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        chars = request.description.chars().count(),
        has_key = request.has_credential(),
        "generate request"
    );

    let mermaid_code = state
        .generator
        .generate(&request.description, &request.credential)
        .await
        .inspect_err(|e| tracing::warn!("generate failed: {e}"))?;

    Ok(Json(GenerationResponse { mermaid_code }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use autograph_generate::{Completion, Provider, ProviderError};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    struct ScriptedProvider {
        reply: Result<String, ProviderError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        async fn complete(
            &self,
            _completion: Completion<'_>,
            _credential: &str,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn test_app(reply: Result<String, ProviderError>) -> (Router, Arc<ScriptedProvider>) {
        let provider = Arc::new(ScriptedProvider {
            reply,
            calls: AtomicUsize::new(0),
        });
        let router = router(Generator::new(provider.clone(), "llama-3.1-8b-instant"));
        (router, provider)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn returns_sanitized_mermaid_code() {
        let (app, provider) = test_app(Ok("```mermaid\ngraph TD\n\nA[\"Boil\"] --> B[\"Pour\"]\n```".into()));

        let response = app
            .oneshot(post_json(r#"{"text":"Boil water. Pour.","api_key":"gsk_test"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"mermaid_code": "graph TD\nA[\"Boil\"] --> B[\"Pour\"]"})
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_key_is_400_without_provider_call() {
        let (app, provider) = test_app(Ok("graph TD".into()));

        let response = app
            .oneshot(post_json(r#"{"text":"anything","api_key":""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"detail": "API Key is missing"})
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn absent_key_field_is_400() {
        let (app, _) = test_app(Ok("graph TD".into()));

        let response = app.oneshot(post_json(r#"{"text":"anything"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn provider_failure_is_500_with_message() {
        let (app, _) = test_app(Err(ProviderError::Chat("Invalid API Key".into())));

        let response = app
            .oneshot(post_json(r#"{"text":"x","api_key":"bad"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"detail": "Invalid API Key"})
        );
    }

    #[tokio::test]
    async fn unreadable_body_is_422() {
        let (app, provider) = test_app(Ok("graph TD".into()));

        let response = app.oneshot(post_json("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json_body(response).await["detail"].is_string());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn service_stays_usable_after_a_failure() {
        let (app, _) = test_app(Ok("graph TD".into()));

        let failed = app
            .clone()
            .oneshot(post_json(r#"{"text":"x","api_key":""}"#))
            .await
            .unwrap();
        assert_eq!(failed.status(), StatusCode::BAD_REQUEST);

        let ok = app
            .oneshot(post_json(r#"{"text":"x","api_key":"k"}"#))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _) = test_app(Ok(String::new()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"status": "ok"}));
    }
}
