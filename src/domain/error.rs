//! 领域层错误类型

use crate::domain::validator::SchemaIssue;
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomainError>;

/// 单个条目的校验失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub key: String,
    pub issue: SchemaIssue,
}

impl fmt::Display for EntryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\": {}", self.key, self.issue)
    }
}

fn summarize(failures: &[EntryFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// 领域层错误类型
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    #[error("注入存储未被填充: 构建期注入从未运行，请先运行 'envz inject' 或调用 InjectedStore::capture")]
    #[diagnostic(
        code(envz::missing_injection),
        help("请在构建阶段启用 envz 注入：运行 'envz inject' 生成注入清单，或在 build.rs 中调用 InjectedStore::capture")
    )]
    MissingInjection,

    #[error("校验环境变量 \"{key}\" 失败: {issue}")]
    #[diagnostic(code(envz::validation))]
    Validation { key: String, issue: SchemaIssue },

    #[error("{} 个环境变量校验失败: {}", .0.len(), summarize(.0))]
    #[diagnostic(code(envz::validation))]
    ValidationErrors(Vec<EntryFailure>),

    #[error("环境变量尚未初始化")]
    #[diagnostic(
        code(envz::not_initialized),
        help("先调用 EnvCell::initialize，再调用 EnvCell::get")
    )]
    NotInitialized,

    #[error("重复声明的条目: {0}")]
    #[diagnostic(code(envz::duplicate_entry))]
    DuplicateEntry(String),

    #[error("条目未找到: {0}")]
    #[diagnostic(code(envz::not_found))]
    NotFound(String),

    #[error("无效的来源: {0}")]
    #[diagnostic(
        code(envz::invalid_source),
        help("有效来源: process, injected, any")
    )]
    InvalidSource(String),

    #[error("IO 错误: {0}")]
    #[diagnostic(code(envz::io))]
    Io(String),

    #[error("解析错误: {0}")]
    #[diagnostic(code(envz::parse))]
    Parse(String),

    #[error("序列化错误: {0}")]
    #[diagnostic(code(envz::serialization))]
    Serialization(String),

    #[error("配置错误: {0}")]
    #[diagnostic(code(envz::config))]
    Config(String),
}

impl DomainError {
    /// 出错的条目名（仅校验类错误）
    #[must_use]
    pub fn failed_keys(&self) -> Vec<&str> {
        match self {
            DomainError::Validation { key, .. } => vec![key.as_str()],
            DomainError::ValidationErrors(failures) => {
                failures.iter().map(|f| f.key.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl From<EntryFailure> for DomainError {
    fn from(failure: EntryFailure) -> Self {
        DomainError::Validation {
            key: failure.key,
            issue: failure.issue,
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.message().to_string())
    }
}
