//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`DUET_` 前缀）
//! 2. 配置文件（config.toml）
//! 3. 兼容变量 `GEMINI_API_KEY` / `PORT`
//! 4. 默认值

use config::{Config, ConfigBuilder, ConfigError as ConfigCrateError, Environment, File};
use config::builder::DefaultState;
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 凭证的兼容环境变量
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// 端口的兼容环境变量
pub const PORT_ENV: &str = "PORT";

/// 加载应用配置
///
/// # 环境变量示例
/// - `GEMINI_API_KEY=...`
/// - `DUET_SERVER__PORT=8080`
/// - `DUET_TTS__MODEL=gemini-2.5-pro-preview-tts`
/// - `DUET_VOICES__JANIS=Kore`
/// - `DUET_SCRIPT__LEADING_TEXT=reject`
///
/// # 返回
/// - `Ok(AppConfig)` - 成功加载的配置
/// - `Err(ConfigError)` - 加载失败；缺少凭证属于此类，进程应直接退出
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = with_defaults(Config::builder())?;

    // 兼容变量只作为默认值，DUET_ 前缀的变量和配置文件可以覆盖
    if let Ok(api_key) = std::env::var(API_KEY_ENV) {
        builder = builder.set_default("tts.api_key", api_key)?;
    }
    if let Some(port) = parse_port_env(std::env::var(PORT_ENV).ok())? {
        builder = builder.set_default("server.port", i64::from(port))?;
    }

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: DUET_TTS__TIMEOUT_SECS=60
    builder = builder.add_source(
        Environment::with_prefix("DUET")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 解析兼容变量 `PORT`；设置了但不是合法端口时报错
fn parse_port_env(raw: Option<String>) -> Result<Option<u16>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.trim().parse::<u16>().map(Some).map_err(|e| {
        ConfigError::ValidationError(format!("Invalid {} value '{}': {}", PORT_ENV, raw, e))
    })
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("server.max_body_bytes", 1024 * 1024)?
        .set_default("tts.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("tts.api_key", "")?
        .set_default("tts.model", "gemini-2.5-flash-preview-tts")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("tts.temperature", 1.0)?
        .set_default("voices.david", "Zephyr")?
        .set_default("voices.janis", "Puck")?
        .set_default("script.leading_text", "discard")?
        .set_default("script.require_all_speakers", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.tts.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "TTS API key is required (set {} or DUET_TTS__API_KEY)",
            API_KEY_ENV
        )));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS base URL cannot be empty".to_string(),
        ));
    }

    if config.tts.model.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS model cannot be empty".to_string(),
        ));
    }

    if config.tts.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "TTS timeout cannot be 0".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.tts.temperature) {
        return Err(ConfigError::ValidationError(
            "TTS temperature must be between 0.0 and 2.0".to_string(),
        ));
    }

    if config.voices.david.trim().is_empty() || config.voices.janis.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice names cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），不输出凭证
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Max Body Size: {} bytes", config.server.max_body_bytes);
    tracing::info!("TTS Base URL: {}", config.tts.base_url);
    tracing::info!("TTS Model: {}", config.tts.model);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("TTS API Key: configured");
    tracing::info!(
        "Voices: david={}, janis={}",
        config.voices.david,
        config.voices.janis
    );
    tracing::info!(
        "Script: leading_text={:?}, require_all_speakers={}",
        config.script.leading_text,
        config.script.require_all_speakers
    );
    tracing::info!("Temp Directory: {}", config.storage.temp_dir().display());
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
