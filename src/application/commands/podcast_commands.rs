//! Podcast Commands

/// 生成播客音频命令
#[derive(Debug, Clone)]
pub struct GeneratePodcast {
    /// 原始对话脚本
    pub script: String,
}
