//! 应用层 - 命令
//!
//! 每个命令对应一次完整的用例编排

mod podcast_commands;

pub mod handlers;

pub use podcast_commands::*;
