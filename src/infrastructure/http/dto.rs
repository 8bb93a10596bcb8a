//! Data Transfer Objects

use serde::{Deserialize, Serialize};

/// POST /generate 请求体
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// 缺失或类型不对都按 400 处理
    #[serde(default)]
    pub script: Option<String>,
}

/// GET / 响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /example 响应
#[derive(Debug, Serialize)]
pub struct ExampleResponse {
    pub example_script: &'static str,
    pub format: &'static str,
}
