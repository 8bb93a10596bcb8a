//! Podcast Command Handlers

use std::sync::Arc;

use crate::application::commands::GeneratePodcast;
use crate::application::error::ApplicationError;
use crate::application::ports::TtsEnginePort;
use crate::domain::{parse_script, AudioArtifact, ParserConfig, VoiceProfile};

/// GeneratePodcast Handler - 解析脚本 → 映射音色 → 合成
pub struct GeneratePodcastHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    voices: Arc<VoiceProfile>,
    parser_config: ParserConfig,
}

impl GeneratePodcastHandler {
    pub fn new(
        tts_engine: Arc<dyn TtsEnginePort>,
        voices: Arc<VoiceProfile>,
        parser_config: ParserConfig,
    ) -> Self {
        Self {
            tts_engine,
            voices,
            parser_config,
        }
    }

    pub async fn handle(&self, command: GeneratePodcast) -> Result<AudioArtifact, ApplicationError> {
        // 脚本不合法时不会发起任何外部调用
        let turns = parse_script(&command.script, &self.parser_config)?;
        let request = self.voices.resolve(turns)?;

        tracing::info!(
            turns = request.turns().len(),
            script_len = command.script.len(),
            "Generating podcast audio"
        );

        let artifact = self.tts_engine.synthesize(request).await.map_err(|e| {
            tracing::error!(error = %e, "TTS synthesis failed");
            ApplicationError::from(e)
        })?;

        if artifact.is_empty() {
            return Err(ApplicationError::UpstreamError(
                "TTS service returned empty audio".to_string(),
            ));
        }

        tracing::info!(audio_size = artifact.len(), "Podcast audio generated");

        Ok(artifact)
    }
}
