//! 进程级结果缓存
//!
//! 两阶段用法：启动时调用一次 [`EnvCell::initialize`]，之后在任何地方调用
//! [`EnvCell::get`]。结果一旦缓存就不会重新计算。
//!
//! ```ignore
//! static ENV: EnvCell = EnvCell::new();
//!
//! ENV.initialize(injected.as_ref(), &schema_map)?;
//! let port: u16 = ENV.get()?.get_as("PORT")?;
//! ```

use super::mapper::{SchemaMapper, resolve_and_validate};
use crate::domain::error::{DomainError, Result};
use crate::domain::models::{ResolvedEnv, SchemaMap};
use crate::infrastructure::InjectedStore;
use std::sync::OnceLock;
use tracing::debug;

/// 只保存一个解析结果的缓存单元
#[derive(Debug, Default)]
pub struct EnvCell {
    inner: OnceLock<ResolvedEnv>,
}

impl EnvCell {
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// 解析并缓存；已缓存时直接返回缓存值，不再解析
    pub fn initialize(
        &self,
        injected: Option<&InjectedStore>,
        map: &SchemaMap,
    ) -> Result<&ResolvedEnv> {
        self.initialize_with(|| resolve_and_validate(map, injected))
    }

    /// 使用给定的映射器解析并缓存
    pub fn initialize_from(
        &self,
        mapper: &SchemaMapper<'_>,
        map: &SchemaMap,
    ) -> Result<&ResolvedEnv> {
        self.initialize_with(|| mapper.map(map))
    }

    fn initialize_with<F>(&self, resolve: F) -> Result<&ResolvedEnv>
    where
        F: FnOnce() -> Result<ResolvedEnv>,
    {
        if let Some(env) = self.inner.get() {
            debug!("环境变量已初始化，忽略重复初始化");
            return Ok(env);
        }
        let env = resolve()?;
        Ok(self.inner.get_or_init(|| env))
    }

    /// 读取缓存结果，未初始化时返回 `NotInitialized`
    pub fn get(&self) -> Result<&ResolvedEnv> {
        self.inner.get().ok_or(DomainError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.get().is_some()
    }
}
