//! check 命令处理器

use super::{CommandContext, CommandHandler, as_store, load_injected};
use crate::application::services::{FailurePolicy, SchemaMapper};
use crate::config::load_schema_file;
use crate::domain::error::Result;
use crate::domain::models::OutputFormat;
use crate::infrastructure::ProcessStore;
use std::io::Write;
use std::path::PathBuf;

/// check 命令：解析并校验全部条目
pub struct CheckCommand {
    schema: PathBuf,
    injected: Option<PathBuf>,
    policy: FailurePolicy,
}

impl CheckCommand {
    pub fn new(schema: PathBuf, injected: Option<PathBuf>, policy: FailurePolicy) -> Self {
        Self {
            schema,
            injected,
            policy,
        }
    }
}

impl CommandHandler for CheckCommand {
    fn execute(&self, ctx: &CommandContext, out: &mut dyn Write) -> Result<()> {
        let map = load_schema_file(&self.schema)?;
        let injected = load_injected(self.injected.as_deref())?;

        let env = SchemaMapper::new(&ProcessStore, as_store(injected.as_ref()))
            .with_policy(self.policy)
            .map(&map)?;

        match ctx.format {
            OutputFormat::Env => {
                if !env.is_empty() {
                    writeln!(out, "{}", env.to_dotenv())?;
                }
            }
            OutputFormat::Json => writeln!(out, "{}", env.to_json_pretty()?)?,
        }

        if ctx.verbose {
            eprintln!("✓ {} 个条目校验通过", env.len());
        }
        Ok(())
    }
}
