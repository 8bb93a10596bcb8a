//! Example Handler

use axum::Json;

use crate::domain::script::{EXAMPLE_SCRIPT, SCRIPT_FORMAT};
use crate::infrastructure::http::dto::ExampleResponse;

/// GET /example - 返回示例脚本
pub async fn get_example() -> Json<ExampleResponse> {
    Json(ExampleResponse {
        example_script: EXAMPLE_SCRIPT,
        format: SCRIPT_FORMAT,
    })
}
