//! Duet - 双人播客语音合成服务
//!
//! 接收 `david:` / `janis:` 格式的对话脚本，调用 Gemini 多说话人 TTS，
//! 以 WAV 附件形式返回音频。
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Script Context: 脚本解析
//! - Voice Context: 说话人音色映射
//! - Audio: 合成结果与 WAV 封装
//!
//! 应用层 (application/):
//! - Ports: TtsEngine
//! - Commands: GeneratePodcast
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: /, /example, /generate
//! - Adapters: Gemini TTS Client, 请求级临时文件

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::{load_config, AppConfig};
