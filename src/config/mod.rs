//! 配置文件
//!
//! - schema_file: TOML 声明文件 → `SchemaMap`

pub mod schema_file;

pub use schema_file::{EntryKind, EntrySpec, load_schema_file, parse_schema_file};
