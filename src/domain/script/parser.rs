//! 脚本解析器
//!
//! 把 `david: ...` / `janis: ...` 格式的对话脚本拆成有序的发言序列

use serde::Deserialize;

use super::{ScriptError, ScriptTurn, Speaker};

/// 第一个说话人标签之前出现的文本如何处理
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadingTextPolicy {
    /// 忽略（记 debug 日志）
    #[default]
    Discard,
    /// 视为格式错误
    Reject,
}

/// 解析配置
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    pub leading_text: LeadingTextPolicy,
    /// 要求每个说话人至少出现一次
    pub require_all_speakers: bool,
}

/// 识别 `<label>:` 前缀，返回说话人和冒号之后的内容
fn split_label(line: &str) -> Option<(Speaker, &str)> {
    let (head, rest) = line.split_once(':')?;
    let speaker = Speaker::from_label(head.trim())?;
    Some((speaker, rest))
}

/// 结束当前发言；去空白后为空的发言直接丢弃
fn flush(current: Option<(Speaker, String)>, turns: &mut Vec<ScriptTurn>) {
    if let Some((speaker, text)) = current {
        match ScriptTurn::new(speaker, text) {
            Ok(turn) => turns.push(turn),
            Err(_) => tracing::debug!(speaker = %speaker, "Dropping empty turn"),
        }
    }
}

/// 解析脚本
///
/// - 每个以说话人标签开头的行开始一轮新发言
/// - 之后没有标签的非空行拼接到当前发言（以空格连接）
/// - 空行忽略
///
/// # 返回
/// - `Ok(Vec<ScriptTurn>)` - 非空，按出现顺序
/// - `Err(ScriptError)` - 空输入或没有可识别的发言时为 `NoTurns`
pub fn parse_script(text: &str, config: &ParserConfig) -> Result<Vec<ScriptTurn>, ScriptError> {
    let mut turns: Vec<ScriptTurn> = Vec::new();
    let mut current: Option<(Speaker, String)> = None;
    let mut first_leading_line: Option<usize> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((speaker, rest)) = split_label(line) {
            flush(current.take(), &mut turns);
            current = Some((speaker, rest.trim().to_string()));
            continue;
        }

        match current.as_mut() {
            Some((_, buffer)) => {
                if !buffer.is_empty() {
                    buffer.push(' ');
                }
                buffer.push_str(line);
            }
            None => {
                tracing::debug!(line = index + 1, "Text before first speaker label");
                first_leading_line.get_or_insert(index + 1);
            }
        }
    }
    flush(current, &mut turns);

    if turns.is_empty() {
        return Err(ScriptError::NoTurns);
    }

    if let (LeadingTextPolicy::Reject, Some(line)) = (config.leading_text, first_leading_line) {
        return Err(ScriptError::LeadingText { line });
    }

    if config.require_all_speakers {
        let missing: Vec<&str> = Speaker::ALL
            .iter()
            .filter(|speaker| !turns.iter().any(|turn| turn.speaker() == **speaker))
            .map(Speaker::label)
            .collect();
        if !missing.is_empty() {
            return Err(ScriptError::MissingSpeakers {
                missing: missing.join(", "),
            });
        }
    }

    Ok(turns)
}
