//! Duet - 双人播客语音合成服务

use std::sync::Arc;

use duet::config::{load_config, print_config, LogConfig};
use duet::infrastructure::http::{AppState, HttpServer, ServerConfig};
use duet::infrastructure::{GeminiTtsClient, GeminiTtsClientConfig};
use tracing_subscriber::EnvFilter;

/// 初始化日志（RUST_LOG 优先于配置的级别）
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},duet={},tower_http=debug", log.level, log.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Ctrl-C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 兼容变量 > 默认值）
    // 缺少凭证时直接退出
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Duet - podcast generator v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 临时目录必须存在
    let temp_dir = config.storage.temp_dir();
    tokio::fs::create_dir_all(&temp_dir).await?;

    // 创建 Gemini TTS 客户端
    let tts_config = GeminiTtsClientConfig {
        base_url: config.tts.base_url.clone(),
        api_key: config.tts.api_key.clone(),
        model: config.tts.model.clone(),
        timeout_secs: config.tts.timeout_secs,
        temperature: config.tts.temperature,
        style_prompt: config.tts.style_prompt.clone(),
    };
    let tts_engine = Arc::new(GeminiTtsClient::new(tts_config)?);

    let state = AppState::new(
        tts_engine,
        Arc::new(config.voices.profile()),
        config.script.parser_config(),
        temp_dir,
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.server.max_body_bytes);
    let server = HttpServer::new(server_config, state);

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
