//! 声明表映射：解析所有原始值，再逐个校验
//!
//! 两遍处理：
//! 1. 解析：按声明顺序为每个条目取原始值
//! 2. 校验：按声明顺序逐个校验，默认遇到第一个失败立即中止

use super::resolver::SourceResolver;
use crate::domain::error::{DomainError, EntryFailure, Result};
use crate::domain::models::{RawEntry, ResolvedEnv, SchemaMap};
use crate::domain::repositories::EnvStore;
use crate::infrastructure::{InjectedStore, MemoryStore, ProcessStore};
use tracing::debug;

/// 校验失败时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// 第一个失败即返回 `Validation`
    #[default]
    FailFast,
    /// 收集全部失败后返回 `ValidationErrors`
    CollectAll,
}

/// 声明表映射器
pub struct SchemaMapper<'a> {
    process: &'a dyn EnvStore,
    injected: Option<&'a dyn EnvStore>,
    policy: FailurePolicy,
}

impl<'a> SchemaMapper<'a> {
    /// `injected` 为 `None` 表示构建期注入从未运行
    pub fn new(process: &'a dyn EnvStore, injected: Option<&'a dyn EnvStore>) -> Self {
        Self {
            process,
            injected,
            policy: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// 第一遍：解析全部原始值
    ///
    /// 只要有条目需要读取注入存储而注入存储不存在，就在任何查询之前返回
    /// `MissingInjection`。
    pub fn resolve_raw(&self, map: &SchemaMap) -> Result<Vec<RawEntry>> {
        let empty = MemoryStore::new();
        let injected: &dyn EnvStore = match self.injected {
            Some(store) => store,
            None if map.needs_injected() => return Err(DomainError::MissingInjection),
            None => &empty,
        };

        let resolver = SourceResolver::new(self.process, injected);
        Ok(map
            .iter()
            .map(|(key, decl)| resolver.trace(key, decl.source()))
            .collect())
    }

    /// 第二遍：逐个校验原始值
    ///
    /// `raw` 必须是同一声明表 [`resolve_raw`](Self::resolve_raw) 的结果。
    pub fn validate(&self, map: &SchemaMap, raw: &[RawEntry]) -> Result<ResolvedEnv> {
        if raw.len() != map.len() {
            return Err(DomainError::Config(format!(
                "原始值数量 {} 与声明数量 {} 不一致",
                raw.len(),
                map.len()
            )));
        }

        let mut env = ResolvedEnv::default();
        let mut failures = Vec::new();

        for ((key, decl), entry) in map.iter().zip(raw) {
            if entry.key != key {
                return Err(DomainError::Config(format!(
                    "原始值顺序与声明不一致: 期望 {key}，实际 {}",
                    entry.key
                )));
            }

            match decl.schema().validate(entry.value.as_deref()) {
                Ok(value) => env.insert(key.to_string(), value),
                Err(issue) => {
                    let failure = EntryFailure {
                        key: key.to_string(),
                        issue,
                    };
                    match self.policy {
                        FailurePolicy::FailFast => return Err(failure.into()),
                        FailurePolicy::CollectAll => failures.push(failure),
                    }
                }
            }
        }

        if !failures.is_empty() {
            return Err(DomainError::ValidationErrors(failures));
        }
        Ok(env)
    }

    /// 完整的一遍解析 + 校验
    pub fn map(&self, map: &SchemaMap) -> Result<ResolvedEnv> {
        debug!(
            entries = map.len(),
            injected = self.injected.is_some(),
            policy = ?self.policy,
            "开始解析环境变量"
        );
        let raw = self.resolve_raw(map)?;
        let env = self.validate(map, &raw)?;
        debug!(entries = env.len(), "环境变量校验完成");
        Ok(env)
    }
}

/// 单次调用形式：从进程环境和给定的注入存储解析并校验
pub fn resolve_and_validate(
    map: &SchemaMap,
    injected: Option<&InjectedStore>,
) -> Result<ResolvedEnv> {
    SchemaMapper::new(&ProcessStore, injected.map(|s| s as &dyn EnvStore)).map(map)
}
