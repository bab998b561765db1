//! 来源解析：按来源选择器从两个存储中取原始值

use crate::domain::models::{EntrySource, RawEntry};
use crate::domain::repositories::EnvStore;
use tracing::trace;

/// 在进程存储和注入存储之间解析条目
///
/// 纯查询，不修改任何存储。
#[derive(Clone, Copy)]
pub struct SourceResolver<'a> {
    process: &'a dyn EnvStore,
    injected: &'a dyn EnvStore,
}

impl<'a> SourceResolver<'a> {
    pub fn new(process: &'a dyn EnvStore, injected: &'a dyn EnvStore) -> Self {
        Self { process, injected }
    }

    fn store(&self, source: EntrySource) -> Option<&'a dyn EnvStore> {
        match source {
            EntrySource::Process => Some(self.process),
            EntrySource::Injected => Some(self.injected),
            EntrySource::Any => None,
        }
    }

    /// 取原始值，所有候选存储都缺失时返回 `None`
    pub fn resolve(&self, name: &str, source: EntrySource) -> Option<String> {
        self.trace(name, source).value
    }

    /// 取原始值并记录实际命中的存储
    pub fn trace(&self, name: &str, source: EntrySource) -> RawEntry {
        for &candidate in source.lookup_order() {
            let Some(store) = self.store(candidate) else {
                continue;
            };
            if let Some(value) = store.get(name) {
                trace!(key = name, store = store.name(), "命中");
                return RawEntry {
                    key: name.to_string(),
                    declared: source,
                    origin: Some(candidate),
                    value: Some(value),
                };
            }
            trace!(key = name, store = store.name(), "未命中");
        }
        RawEntry::absent(name.to_string(), source)
    }
}
