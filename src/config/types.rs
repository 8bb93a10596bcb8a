//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use crate::domain::{LeadingTextPolicy, ParserConfig, VoiceProfile};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 说话人音色配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 脚本解析配置
    #[serde(default)]
    pub script: ScriptConfig,

    /// 临时文件配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TTS 服务配置
#[derive(Clone, Deserialize)]
pub struct TtsConfig {
    /// Gemini API 基础 URL
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    /// API 凭证（必填）
    #[serde(default)]
    pub api_key: String,

    /// TTS 模型
    #[serde(default = "default_tts_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 采样温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 朗读风格提示
    #[serde(default = "default_style_prompt")]
    pub style_prompt: String,
}

fn default_tts_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

fn default_temperature() -> f32 {
    1.0
}

fn default_style_prompt() -> String {
    "Read aloud in a warm, welcoming tone:".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_tts_base_url(),
            api_key: String::new(),
            model: default_tts_model(),
            timeout_secs: default_tts_timeout(),
            temperature: default_temperature(),
            style_prompt: default_style_prompt(),
        }
    }
}

impl fmt::Debug for TtsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("style_prompt", &self.style_prompt)
            .finish()
    }
}

/// 说话人音色配置（Gemini 预置音色名）
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    #[serde(default = "default_david_voice")]
    pub david: String,

    #[serde(default = "default_janis_voice")]
    pub janis: String,
}

fn default_david_voice() -> String {
    "Zephyr".to_string()
}

fn default_janis_voice() -> String {
    "Puck".to_string()
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            david: default_david_voice(),
            janis: default_janis_voice(),
        }
    }
}

impl VoicesConfig {
    /// 构建只读的音色映射表
    pub fn profile(&self) -> VoiceProfile {
        VoiceProfile::new(self.david.clone(), self.janis.clone())
    }
}

/// 脚本解析配置
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptConfig {
    /// 第一个标签前的文本：discard / reject
    #[serde(default)]
    pub leading_text: LeadingTextPolicy,

    /// 要求两位说话人都出现
    #[serde(default = "default_require_all_speakers")]
    pub require_all_speakers: bool,
}

fn default_require_all_speakers() -> bool {
    true
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            leading_text: LeadingTextPolicy::default(),
            require_all_speakers: default_require_all_speakers(),
        }
    }
}

impl ScriptConfig {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            leading_text: self.leading_text,
            require_all_speakers: self.require_all_speakers,
        }
    }
}

/// 临时文件配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// 临时音频目录，未设置时使用系统临时目录
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
