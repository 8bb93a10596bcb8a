//! 合成请求 - 按映射表解析后的对话

use crate::domain::script::{ScriptTurn, Speaker};

use super::VoiceProfile;

/// 说话人与音色的绑定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerVoice {
    pub speaker: Speaker,
    pub voice: String,
}

/// 合成请求
///
/// 每次调用构建一次，用完即弃。
/// `voices` 覆盖映射表中的全部说话人，多说话人合成需要完整的配置。
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    turns: Vec<ScriptTurn>,
    voices: Vec<SpeakerVoice>,
}

impl SynthesisRequest {
    pub fn new(turns: Vec<ScriptTurn>, profile: &VoiceProfile) -> Self {
        let voices = profile
            .entries()
            .map(|(speaker, voice)| SpeakerVoice {
                speaker,
                voice: voice.to_string(),
            })
            .collect();
        Self { turns, voices }
    }

    pub fn turns(&self) -> &[ScriptTurn] {
        &self.turns
    }

    pub fn voices(&self) -> &[SpeakerVoice] {
        &self.voices
    }

    /// 规范化后的对话文本，每轮一行 `<label>: <text>`
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(ScriptTurn::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_binds_every_speaker() {
        let turns = vec![ScriptTurn::new(Speaker::David, "solo").unwrap()];
        let request = SynthesisRequest::new(turns, &VoiceProfile::new("Kore", "Puck"));

        assert_eq!(
            request.voices(),
            &[
                SpeakerVoice {
                    speaker: Speaker::David,
                    voice: "Kore".to_string()
                },
                SpeakerVoice {
                    speaker: Speaker::Janis,
                    voice: "Puck".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_transcript_is_normalized() {
        let turns = vec![
            ScriptTurn::new(Speaker::David, " hi ").unwrap(),
            ScriptTurn::new(Speaker::Janis, "hello").unwrap(),
        ];
        let request = SynthesisRequest::new(turns, &VoiceProfile::default());
        assert_eq!(request.transcript(), "david: hi\njanis: hello");
    }
}
