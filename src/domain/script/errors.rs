//! Script Context - Errors

use thiserror::Error;

use super::Speaker;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("no valid speaker turns found")]
    NoTurns,

    #[error("unknown speaker: {0}")]
    UnknownSpeaker(String),

    #[error("turn for speaker '{0}' has no text")]
    EmptyTurn(Speaker),

    #[error("unrecognized text before the first speaker label (line {line})")]
    LeadingText { line: usize },

    #[error("Script must contain both 'david:' and 'janis:' speakers (missing: {missing})")]
    MissingSpeakers { missing: String },
}
