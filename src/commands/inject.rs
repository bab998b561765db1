//! inject 命令处理器（构建期捕获）

use super::{CommandContext, CommandHandler};
use crate::config::load_schema_file;
use crate::domain::error::Result;
use crate::infrastructure::{DotenvStore, InjectedStore};
use std::io::Write;
use std::path::PathBuf;

/// inject 命令：从 .env 文件和当前进程环境捕获声明的条目，写入注入清单
pub struct InjectCommand {
    schema: PathBuf,
    output: PathBuf,
    env_dir: PathBuf,
    mode: String,
}

impl InjectCommand {
    pub fn new(schema: PathBuf, output: PathBuf, env_dir: PathBuf, mode: String) -> Self {
        Self {
            schema,
            output,
            env_dir,
            mode,
        }
    }
}

impl CommandHandler for InjectCommand {
    fn execute(&self, ctx: &CommandContext, out: &mut dyn Write) -> Result<()> {
        let map = load_schema_file(&self.schema)?;
        let dotenv = DotenvStore::load(&self.env_dir, &self.mode)?;
        let files = dotenv.loaded_files().len();
        let build_env = dotenv.over_process();

        let store = InjectedStore::capture(&map, &build_env);
        store.save(&self.output)?;

        if ctx.verbose {
            writeln!(
                out,
                "✓ 已写入 {}/{} 个条目到 {}（模式 {}，读取 {} 个 .env 文件）",
                store.len(),
                map.len(),
                self.output.display(),
                self.mode,
                files
            )?;
        }
        Ok(())
    }
}
