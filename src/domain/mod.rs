//! Domain Layer - 核心模型
//!
//! 包含：
//! - models: 来源选择器、条目声明、解析结果
//! - validator: 校验能力
//! - repositories: 存储接口（输出端口）
//! - error: 领域错误类型

pub mod error;
pub mod models;
pub mod repositories;
pub mod validator;

pub use error::{DomainError, EntryFailure, Result};
pub use models::{
    EntryDeclaration, EntrySource, OutputFormat, RawEntry, ResolvedEnv, SchemaMap,
    SchemaMapBuilder,
};
pub use repositories::EnvStore;
pub use validator::{IssueCode, SchemaIssue, Validator, ValidatorExt};
