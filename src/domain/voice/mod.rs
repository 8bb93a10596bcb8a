//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 说话人 → TTS 预置音色映射
//! - 把解析出的发言绑定到音色，得到合成请求

mod profile;
mod request;

pub use profile::VoiceProfile;
pub use request::{SpeakerVoice, SynthesisRequest};
