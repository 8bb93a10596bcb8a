//! Domain Layer - 领域层
//!
//! 包含:
//! - Script Context: 对话脚本解析
//! - Voice Context: 说话人音色映射
//! - Audio: 合成结果与 WAV 封装

pub mod audio;
pub mod script;
pub mod voice;

pub use audio::{AudioArtifact, AudioFormat};
pub use script::{parse_script, LeadingTextPolicy, ParserConfig, ScriptError, ScriptTurn, Speaker};
pub use voice::{SpeakerVoice, SynthesisRequest, VoiceProfile};
