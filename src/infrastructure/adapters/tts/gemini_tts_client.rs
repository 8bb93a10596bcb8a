//! Gemini TTS Client - 调用 Gemini 多说话人语音合成
//!
//! 实现 TtsEnginePort trait，整段对话一次请求完成（不按轮次拆分）
//!
//! 外部 TTS API:
//! POST {base_url}/v1beta/models/{model}:generateContent
//! Header: x-goog-api-key
//! Request: contents + generationConfig.speechConfig.multiSpeakerVoiceConfig (JSON)
//! Response: candidates[0].content.parts[].inlineData { mimeType, data(base64) }

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, TtsEnginePort, TtsError};
use crate::domain::audio::wav::{is_pcm_mime, is_wav_mime, pcm_to_wav, PcmFormat};
use crate::domain::AudioArtifact;

const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    temperature: f32,
    response_modalities: [&'static str; 1],
    speech_config: SpeechConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    multi_speaker_voice_config: MultiSpeakerVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MultiSpeakerVoiceConfig<'a> {
    speaker_voice_configs: Vec<SpeakerVoiceConfig<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeakerVoiceConfig<'a> {
    speaker: &'static str,
    voice_config: VoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// Gemini TTS 客户端配置
#[derive(Clone)]
pub struct GeminiTtsClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API 凭证
    pub api_key: String,
    /// TTS 模型名
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 采样温度
    pub temperature: f32,
    /// 放在对话文本前的朗读风格提示
    pub style_prompt: String,
}

impl fmt::Debug for GeminiTtsClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiTtsClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("style_prompt", &self.style_prompt)
            .finish()
    }
}

impl Default for GeminiTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model: "gemini-2.5-flash-preview-tts".to_string(),
            timeout_secs: 120,
            temperature: 1.0,
            style_prompt: "Read aloud in a warm, welcoming tone:".to_string(),
        }
    }
}

impl GeminiTtsClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Gemini TTS 客户端
pub struct GeminiTtsClient {
    client: Client,
    config: GeminiTtsClientConfig,
}

impl GeminiTtsClient {
    /// 创建新的 Gemini TTS 客户端
    pub fn new(config: GeminiTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn prompt(&self, request: &SynthesisRequest) -> String {
        let transcript = request.transcript();
        if self.config.style_prompt.is_empty() {
            transcript
        } else {
            format!("{}\n{}", self.config.style_prompt, transcript)
        }
    }

    fn build_body<'a>(&self, request: &'a SynthesisRequest) -> GenerateContentRequest<'a> {
        let speaker_voice_configs = request
            .voices()
            .iter()
            .map(|binding| SpeakerVoiceConfig {
                speaker: binding.speaker.label(),
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: &binding.voice,
                    },
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart {
                    text: self.prompt(request),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    multi_speaker_voice_config: MultiSpeakerVoiceConfig {
                        speaker_voice_configs,
                    },
                },
            },
        }
    }
}

/// 提取错误消息：优先使用 `{"error":{"message":...}}`，否则用原始响应体
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// 出错响应的消息；响应体读取失败时使用读取错误本身
fn service_error_message<E: fmt::Display>(body: Result<String, E>) -> String {
    match body {
        Ok(text) => error_message(&text),
        Err(e) => format!("Failed to read error response: {}", e),
    }
}

/// 拼接第一个候选结果中的所有音频片段，并统一输出 WAV
fn decode_audio(response: GenerateContentResponse) -> Result<AudioArtifact, TtsError> {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default();

    let mut mime_type: Option<String> = None;
    let mut audio = Vec::new();

    for inline in parts.into_iter().filter_map(|part| part.inline_data) {
        let bytes = BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| TtsError::InvalidResponse(format!("Invalid base64 audio: {}", e)))?;
        audio.extend_from_slice(&bytes);
        mime_type.get_or_insert(inline.mime_type);
    }

    let mime_type = match mime_type {
        Some(mime) if !audio.is_empty() => mime,
        _ => {
            return Err(TtsError::InvalidResponse(
                "No audio data in response".to_string(),
            ))
        }
    };

    if is_wav_mime(&mime_type) {
        Ok(AudioArtifact::wav(audio))
    } else if is_pcm_mime(&mime_type) {
        let format = PcmFormat::from_mime(&mime_type);
        tracing::debug!(
            mime_type = %mime_type,
            sample_rate = format.sample_rate,
            bits_per_sample = format.bits_per_sample,
            "Wrapping PCM audio in WAV container"
        );
        let wav = pcm_to_wav(&audio, &format)
            .map_err(|e| TtsError::InvalidResponse(format!("Malformed PCM audio: {}", e)))?;
        Ok(AudioArtifact::wav(wav))
    } else {
        Err(TtsError::InvalidResponse(format!(
            "Unsupported audio type: {}",
            mime_type
        )))
    }
}

#[async_trait]
impl TtsEnginePort for GeminiTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioArtifact, TtsError> {
        let body = self.build_body(&request);
        let voices: Vec<String> = request
            .voices()
            .iter()
            .map(|v| format!("{}={}", v.speaker, v.voice))
            .collect();

        tracing::debug!(
            model = %self.config.model,
            turns = request.turns().len(),
            voices = ?voices,
            "Sending TTS synthesis request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::ServiceError {
                status: status.as_u16(),
                message: service_error_message(response.text().await),
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let artifact = decode_audio(payload)?;

        tracing::info!(
            model = %self.config.model,
            audio_size = artifact.len(),
            "TTS synthesis completed"
        );

        Ok(artifact)
    }
}
