//! Script Context - 对话脚本限界上下文
//!
//! 职责:
//! - 说话人封闭集合
//! - 脚本解析与校验

mod errors;
mod example;
mod parser;
mod value_objects;

pub use errors::ScriptError;
pub use example::{EXAMPLE_SCRIPT, SCRIPT_FORMAT};
pub use parser::{parse_script, LeadingTextPolicy, ParserConfig};
pub use value_objects::{ScriptTurn, Speaker};
