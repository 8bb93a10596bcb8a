//! Voice Context - 说话人到音色的映射表

use crate::domain::script::{ScriptError, ScriptTurn, Speaker};

use super::SynthesisRequest;

/// 音色映射表
///
/// 启动时由配置构建一次，之后只读共享。
/// 每个 `Speaker` 都有对应的音色，所以 `voice_for` 不会失败。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceProfile {
    david: String,
    janis: String,
}

impl VoiceProfile {
    pub fn new(david: impl Into<String>, janis: impl Into<String>) -> Self {
        Self {
            david: david.into(),
            janis: janis.into(),
        }
    }

    /// 说话人对应的 TTS 预置音色名
    pub fn voice_for(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::David => &self.david,
            Speaker::Janis => &self.janis,
        }
    }

    /// 按标签查找音色（大小写不敏感）
    pub fn voice_for_label(&self, label: &str) -> Result<&str, ScriptError> {
        Speaker::from_label(label)
            .map(|speaker| self.voice_for(speaker))
            .ok_or_else(|| ScriptError::UnknownSpeaker(label.to_string()))
    }

    /// 把发言绑定到音色，得到合成请求
    ///
    /// 任何一轮的说话人在映射表中找不到音色都会返回 `UnknownSpeaker`，
    /// 此时不应发起外部调用
    pub fn resolve(&self, turns: Vec<ScriptTurn>) -> Result<SynthesisRequest, ScriptError> {
        for turn in &turns {
            self.voice_for_label(turn.speaker().label())?;
        }
        Ok(SynthesisRequest::new(turns, self))
    }

    /// 按 `Speaker::ALL` 顺序遍历全部映射
    pub fn entries(&self) -> impl Iterator<Item = (Speaker, &str)> + '_ {
        Speaker::ALL
            .into_iter()
            .map(move |speaker| (speaker, self.voice_for(speaker)))
    }
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self::new("Zephyr", "Puck")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::script::{parse_script, ParserConfig};

    #[test]
    fn test_default_voices() {
        let profile = VoiceProfile::default();
        assert_eq!(profile.voice_for(Speaker::David), "Zephyr");
        assert_eq!(profile.voice_for(Speaker::Janis), "Puck");
    }

    #[test]
    fn test_lookup_by_label() {
        let profile = VoiceProfile::new("Kore", "Charon");
        assert_eq!(profile.voice_for_label("DAVID").unwrap(), "Kore");
        assert_eq!(profile.voice_for_label("janis").unwrap(), "Charon");

        let err = profile.voice_for_label("narrator").unwrap_err();
        assert!(matches!(err, ScriptError::UnknownSpeaker(ref l) if l == "narrator"));
        assert!(err.to_string().starts_with("unknown speaker"));
    }

    #[test]
    fn test_every_parsed_speaker_has_a_voice() {
        let profile = VoiceProfile::default();
        let turns = parse_script(
            "Janis: a\ndavid: b\nJANIS: c\nDavid: d",
            &ParserConfig::default(),
        )
        .unwrap();
        for turn in &turns {
            assert!(profile.voice_for_label(turn.speaker().label()).is_ok());
        }
    }

    #[test]
    fn test_resolve_binds_turns_to_voices() {
        let profile = VoiceProfile::new("Kore", "Charon");
        let turns = parse_script("david: hi\njanis: hello", &ParserConfig::default()).unwrap();

        let request = profile.resolve(turns).unwrap();
        assert_eq!(request.turns().len(), 2);
        assert_eq!(request.transcript(), "david: hi\njanis: hello");
        let voices: Vec<_> = request
            .voices()
            .iter()
            .map(|binding| (binding.speaker, binding.voice.as_str()))
            .collect();
        assert_eq!(voices, vec![(Speaker::David, "Kore"), (Speaker::Janis, "Charon")]);
    }

    #[test]
    fn test_resolve_single_speaker_still_binds_both_voices() {
        let profile = VoiceProfile::default();
        let turns = vec![ScriptTurn::new(Speaker::Janis, "solo").unwrap()];

        let request = profile.resolve(turns).unwrap();
        assert_eq!(request.voices().len(), Speaker::ALL.len());
    }

    #[test]
    fn test_entries_cover_all_speakers() {
        let profile = VoiceProfile::default();
        let entries: Vec<_> = profile.entries().collect();
        assert_eq!(
            entries,
            vec![(Speaker::David, "Zephyr"), (Speaker::Janis, "Puck")]
        );
    }
}
