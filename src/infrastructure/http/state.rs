//! Application State
//!
//! 所有请求共享的只读状态；请求之间没有可变共享数据

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{GeneratePodcastHandler, TtsEnginePort};
use crate::domain::{ParserConfig, VoiceProfile};

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub generate_handler: GeneratePodcastHandler,

    // ========== Storage ==========
    /// 请求级临时音频文件所在目录
    pub temp_dir: PathBuf,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        tts_engine: Arc<dyn TtsEnginePort>,
        voices: Arc<VoiceProfile>,
        parser_config: ParserConfig,
        temp_dir: PathBuf,
    ) -> Self {
        Self {
            generate_handler: GeneratePodcastHandler::new(tts_engine, voices, parser_config),
            temp_dir,
        }
    }
}
