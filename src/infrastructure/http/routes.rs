//! HTTP Routes
//!
//! API Endpoints:
//! - /          GET   健康检查
//! - /example   GET   示例脚本
//! - /generate  POST  脚本 → WAV 音频

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::health_check))
        .route("/example", get(handlers::get_example))
        .route("/generate", post(handlers::generate_podcast))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::script::EXAMPLE_SCRIPT;
    use crate::domain::{ParserConfig, VoiceProfile};
    use crate::infrastructure::adapters::FakeTtsClient;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    fn app(temp_dir: &std::path::Path) -> Router {
        let state = AppState::new(
            Arc::new(FakeTtsClient::returning(b"audio".to_vec())),
            Arc::new(VoiceProfile::default()),
            ParserConfig::default(),
            temp_dir.to_path_buf(),
        );
        create_routes().with_state(Arc::new(state))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(app(temp_dir.path()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "duet");
    }

    #[tokio::test]
    async fn test_example_is_stable_across_generate_calls() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = app(temp_dir.path());

        let (status, before) = get_json(app.clone(), "/example").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(before["example_script"], EXAMPLE_SCRIPT);
        assert!(before["format"].as_str().unwrap().contains("david:"));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"script": "janis: hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        drop(response);

        let (_, after) = get_json(app, "/example").await;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let response = app(temp_dir.path())
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
