//! explain 命令处理器

use super::{CommandContext, CommandHandler, load_injected};
use crate::application::services::SchemaMapper;
use crate::config::load_schema_file;
use crate::domain::error::Result;
use crate::domain::models::{OutputFormat, RawEntry, SchemaMap};
use crate::infrastructure::ProcessStore;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

/// explain 命令：逐个显示条目的实际来源与校验结果，不输出值
pub struct ExplainCommand {
    schema: PathBuf,
    injected: Option<PathBuf>,
}

/// 单个条目的诊断结果
struct Explanation<'a> {
    raw: &'a RawEntry,
    issue: Option<String>,
}

impl ExplainCommand {
    pub fn new(schema: PathBuf, injected: Option<PathBuf>) -> Self {
        Self { schema, injected }
    }

    fn explain<'a>(map: &SchemaMap, raw: &'a [RawEntry]) -> Vec<Explanation<'a>> {
        map.iter()
            .zip(raw)
            .map(|((_, decl), raw)| Explanation {
                raw,
                issue: decl
                    .schema()
                    .validate(raw.value.as_deref())
                    .err()
                    .map(|issue| issue.to_string()),
            })
            .collect()
    }
}

impl CommandHandler for ExplainCommand {
    fn execute(&self, ctx: &CommandContext, out: &mut dyn Write) -> Result<()> {
        let map = load_schema_file(&self.schema)?;
        let loaded = load_injected(self.injected.as_deref())?;
        let missing_injection = loaded.is_none();
        // 注入缺失时按空存储继续诊断
        let injected = loaded.unwrap_or_default();

        let raw = SchemaMapper::new(&ProcessStore, Some(&injected)).resolve_raw(&map)?;
        let explanations = Self::explain(&map, &raw);

        match ctx.format {
            OutputFormat::Json => {
                let entries: Vec<_> = explanations
                    .iter()
                    .map(|e| {
                        json!({
                            "key": e.raw.key,
                            "declared": e.raw.declared,
                            "origin": e.raw.origin,
                            "valid": e.issue.is_none(),
                            "issue": e.issue,
                        })
                    })
                    .collect();
                let report = json!({
                    "injection": !missing_injection,
                    "entries": entries,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            }
            OutputFormat::Env => {
                if missing_injection {
                    writeln!(out, "⚠️  注入存储不存在，按空存储解析")?;
                }
                for e in &explanations {
                    let origin = e
                        .raw
                        .origin
                        .map_or_else(|| "(缺失)".to_string(), |o| o.to_string());
                    match &e.issue {
                        None => {
                            writeln!(out, "✓ {} [{}] ← {}", e.raw.key, e.raw.declared, origin)?
                        }
                        Some(issue) => writeln!(
                            out,
                            "❌ {} [{}] ← {}: {}",
                            e.raw.key, e.raw.declared, origin, issue
                        )?,
                    }
                }
                let failed = explanations.iter().filter(|e| e.issue.is_some()).count();
                if ctx.verbose || failed > 0 {
                    writeln!(out, "\n{} 个条目，{} 个校验失败", explanations.len(), failed)?;
                }
            }
        }
        Ok(())
    }
}
