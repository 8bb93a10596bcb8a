//! Health Handler
//!
//! 固定的存活检查响应，不探测上游 TTS 服务

use axum::Json;

use crate::infrastructure::http::dto::HealthResponse;

/// GET / - 健康检查
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
