//! TTS Engine Port - 多说话人 TTS 合成抽象
//!
//! 定义合成接口（合成请求见 domain::voice），具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::AudioArtifact;

pub use crate::domain::{SpeakerVoice, SynthesisRequest};

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// TTS Engine Port
///
/// 一次调用对应一次外部请求：不缓存、不重试
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 合成整段对话
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioArtifact, TtsError>;
}
