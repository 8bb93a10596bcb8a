//! Generate Handler - 脚本 → 播客音频

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::GeneratePodcast;
use crate::infrastructure::adapters::TempAudioFile;
use crate::infrastructure::http::dto::GenerateRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 下载文件名 `podcast_<8 位十六进制>.<ext>`
fn download_name(extension: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("podcast_{}.{}", &id[..8], extension)
}

/// POST /generate - 生成播客音频
///
/// 成功时音频先写入临时文件再流式返回；响应体被丢弃后临时文件即被删除
pub async fn generate_podcast(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let script = match payload {
        Ok(Json(GenerateRequest {
            script: Some(script),
        })) => script,
        Ok(_) => return Err(ApiError::BadRequest("Script text is required".to_string())),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected generate request body");
            let message = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                "Script is too large"
            } else {
                "Script text is required"
            };
            return Err(ApiError::BadRequest(message.to_string()));
        }
    };

    let artifact = state
        .generate_handler
        .handle(GeneratePodcast { script })
        .await?;

    let format = artifact.format();
    let file = TempAudioFile::create(&state.temp_dir, &artifact)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to write audio file: {}", e)))?;
    drop(artifact);

    let file_size = file.len();
    let stream = file
        .into_stream()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to open audio file: {}", e)))?;

    let filename = download_name(format.extension());
    tracing::info!(filename = %filename, size = file_size, "Streaming podcast audio");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(header::CONTENT_LENGTH, file_size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
