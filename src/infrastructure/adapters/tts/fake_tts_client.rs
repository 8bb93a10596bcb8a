//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 不实际调用 TTS 服务：返回固定音频或固定错误，并记录调用次数

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{SpeakerVoice, SynthesisRequest, TtsEnginePort, TtsError};
use crate::domain::AudioArtifact;

/// 固定的合成结果
#[derive(Debug, Clone)]
enum FakeOutcome {
    Audio(Vec<u8>),
    Failure { status: u16, message: String },
}

/// Fake TTS Client
pub struct FakeTtsClient {
    outcome: FakeOutcome,
    calls: AtomicUsize,
    last_request: Mutex<Option<SynthesisRequest>>,
}

impl FakeTtsClient {
    /// 每次调用都返回给定的音频数据
    pub fn returning(audio_data: Vec<u8>) -> Self {
        Self::with_outcome(FakeOutcome::Audio(audio_data))
    }

    /// 每次调用都返回服务错误
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self::with_outcome(FakeOutcome::Failure {
            status,
            message: message.into(),
        })
    }

    fn with_outcome(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// 已收到的合成请求数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 最近一次请求的对话文本
    pub fn last_transcript(&self) -> Option<String> {
        self.last_request().map(|request| request.transcript())
    }

    /// 最近一次请求绑定的音色
    pub fn last_voices(&self) -> Vec<SpeakerVoice> {
        self.last_request()
            .map(|request| request.voices().to_vec())
            .unwrap_or_default()
    }

    fn last_request(&self) -> Option<SynthesisRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioArtifact, TtsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        tracing::debug!(
            turns = request.turns().len(),
            "FakeTtsClient: returning fixed outcome"
        );

        match &self.outcome {
            FakeOutcome::Audio(data) => Ok(AudioArtifact::wav(data.clone())),
            FakeOutcome::Failure { status, message } => Err(TtsError::ServiceError {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
