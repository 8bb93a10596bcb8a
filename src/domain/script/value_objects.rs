//! Script Context - Value Objects

use std::fmt;

use super::ScriptError;

/// 说话人（封闭集合，只支持两位主播）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    David,
    Janis,
}

impl Speaker {
    /// 全部说话人，顺序即多说话人配置中的顺序
    pub const ALL: [Speaker; 2] = [Speaker::David, Speaker::Janis];

    /// 规范标签（小写，同时也是发给 TTS 服务的 speaker 名）
    pub fn label(&self) -> &'static str {
        match self {
            Self::David => "david",
            Self::Janis => "janis",
        }
    }

    /// 从标签解析，大小写不敏感
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|speaker| speaker.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 脚本中的一轮发言
///
/// 不变量:
/// - text 非空且已去除首尾空白
/// - 创建后不可修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTurn {
    speaker: Speaker,
    text: String,
}

impl ScriptTurn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Result<Self, ScriptError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ScriptError::EmptyTurn(speaker));
        }
        Ok(Self {
            speaker,
            text: trimmed.to_string(),
        })
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ScriptTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.speaker, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_from_label_is_case_insensitive() {
        assert_eq!(Speaker::from_label("david"), Some(Speaker::David));
        assert_eq!(Speaker::from_label("JANIS"), Some(Speaker::Janis));
        assert_eq!(Speaker::from_label("Janis"), Some(Speaker::Janis));
        assert_eq!(Speaker::from_label("davidson"), None);
        assert_eq!(Speaker::from_label(""), None);
    }

    #[test]
    fn test_turn_text_is_trimmed() {
        let turn = ScriptTurn::new(Speaker::David, "  hello there \t").unwrap();
        assert_eq!(turn.text(), "hello there");
        assert_eq!(turn.to_string(), "david: hello there");
    }

    #[test]
    fn test_turn_rejects_blank_text() {
        assert!(matches!(
            ScriptTurn::new(Speaker::Janis, "   "),
            Err(ScriptError::EmptyTurn(Speaker::Janis))
        ));
    }
}
