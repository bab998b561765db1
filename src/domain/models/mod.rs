//! 领域实体

pub mod entry_source;
pub mod resolved;
pub mod schema_map;

pub use entry_source::EntrySource;
pub use resolved::{RawEntry, ResolvedEnv};
pub use schema_map::{EntryDeclaration, SchemaMap, SchemaMapBuilder};

/// 输出格式类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Env,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "j" => OutputFormat::Json,
            _ => OutputFormat::Env,
        }
    }
}
