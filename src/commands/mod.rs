//! 命令处理器
//!
//! 每个命令一个模块，实现 CommandHandler trait

use crate::domain::error::Result;
use crate::domain::models::OutputFormat;
use crate::domain::repositories::EnvStore;
use crate::infrastructure::InjectedStore;
use std::path::Path;

pub mod check;
pub mod explain;
pub mod inject;

pub use check::CheckCommand;
pub use explain::ExplainCommand;
pub use inject::InjectCommand;

/// 命令上下文
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub verbose: bool,
    pub format: OutputFormat,
}

/// 命令处理器 trait
pub trait CommandHandler {
    /// 执行命令，输出写入 `out`
    fn execute(&self, ctx: &CommandContext, out: &mut dyn std::io::Write) -> Result<()>;
}

/// 读取注入清单，未指定路径时视为从未注入
fn load_injected(path: Option<&Path>) -> Result<Option<InjectedStore>> {
    match path {
        Some(path) => InjectedStore::load(path),
        None => Ok(None),
    }
}

fn as_store(injected: Option<&InjectedStore>) -> Option<&dyn EnvStore> {
    injected.map(|s| s as &dyn EnvStore)
}
