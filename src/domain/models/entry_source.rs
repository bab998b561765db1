//! 条目来源选择器

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 条目的原始值从哪个存储读取
///
/// 反序列化经由 [`EntrySource::parse`]，因此接受与其相同的别名。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum EntrySource {
    /// 进程环境变量
    Process,
    /// 构建期注入的存储
    Injected,
    /// 先查注入存储，缺失时回退到进程环境
    #[default]
    Any,
}

impl TryFrom<String> for EntrySource {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntrySource::Process => write!(f, "process"),
            EntrySource::Injected => write!(f, "injected"),
            EntrySource::Any => write!(f, "any"),
        }
    }
}

impl EntrySource {
    /// 从字符串解析，不区分大小写
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "process" => Ok(EntrySource::Process),
            "injected" | "importmeta" | "import_meta" => Ok(EntrySource::Injected),
            "any" | "all" => Ok(EntrySource::Any),
            _ => Err(DomainError::InvalidSource(s.to_string())),
        }
    }

    /// 实际查询的存储顺序，先命中者胜出
    ///
    /// `Any` 的顺序固定为注入存储优先，不可调整。
    #[must_use]
    pub fn lookup_order(&self) -> &'static [EntrySource] {
        match self {
            EntrySource::Process => &[EntrySource::Process],
            EntrySource::Injected => &[EntrySource::Injected],
            EntrySource::Any => &[EntrySource::Injected, EntrySource::Process],
        }
    }

    /// 是否需要读取注入存储
    #[must_use]
    pub fn reads_injected(&self) -> bool {
        !matches!(self, EntrySource::Process)
    }
}
