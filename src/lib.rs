//! envz - 类型安全的环境变量解析与校验
//!
//! 按声明表从两个存储中解析条目：进程环境变量，以及构建期注入的存储。
//! 未指定来源时先查注入存储，再回退到进程环境；随后逐个校验并转换为类型化的值。

// 领域层
pub mod domain;

// 应用层
pub mod application;

// 基础设施层
pub mod infrastructure;

// 内置校验器
pub mod schema;

// 声明文件
pub mod config;

// 命令层
pub mod commands;

// CLI 定义
pub mod cli;

// 日志
pub mod logging;

#[cfg(test)]
mod test_utils;

// 重新导出常用类型
pub use application::{
    EnvCell, FailurePolicy, SchemaMapper, SourceResolver, resolve_and_validate,
};
pub use domain::{
    DomainError, EntryDeclaration, EntrySource, EnvStore, Result, ResolvedEnv, SchemaIssue,
    SchemaMap, Validator, ValidatorExt,
};
pub use infrastructure::{DotenvStore, InjectedStore, MemoryStore, ProcessStore};
