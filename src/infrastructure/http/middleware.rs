//! HTTP Middleware
//!
//! 错误响应日志：记录 4xx / 5xx 的方法、路径、状态码和耗时

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 错误响应日志中间件
///
/// 只记录状态行；具体错误消息在 `ApiError::into_response()` 中记录。
/// 流式响应的耗时只统计到响应头返回为止。
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "Request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "Request rejected"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use tower::util::ServiceExt;

    fn router() -> Router {
        Router::new()
            .route("/accepted", post(|| async { StatusCode::ACCEPTED }))
            .route("/rejected", post(|| async { StatusCode::BAD_REQUEST }))
            .route("/failed", post(|| async { StatusCode::BAD_GATEWAY }))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_status_passes_through_unchanged() {
        assert_eq!(status_of("/accepted").await, StatusCode::ACCEPTED);
        assert_eq!(status_of("/rejected").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of("/failed").await, StatusCode::BAD_GATEWAY);
        assert_eq!(status_of("/missing").await, StatusCode::NOT_FOUND);
    }
}
