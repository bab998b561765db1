//! 条目声明与有序的声明表

use crate::domain::error::{DomainError, Result};
use crate::domain::models::EntrySource;
use crate::domain::validator::Validator;
use std::fmt;
use std::sync::Arc;

/// 单个条目的声明：校验器 + 来源
#[derive(Clone)]
pub struct EntryDeclaration {
    schema: Arc<dyn Validator>,
    source: EntrySource,
}

impl EntryDeclaration {
    /// 创建声明，来源默认为 `Any`
    pub fn new(schema: impl Validator + 'static) -> Self {
        Self {
            schema: Arc::new(schema),
            source: EntrySource::default(),
        }
    }

    /// 指定来源
    #[must_use]
    pub fn from_source(mut self, source: EntrySource) -> Self {
        self.source = source;
        self
    }

    pub fn schema(&self) -> &dyn Validator {
        self.schema.as_ref()
    }

    pub fn source(&self) -> EntrySource {
        self.source
    }
}

impl fmt::Debug for EntryDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryDeclaration")
            .field("schema", &"<validator>")
            .field("source", &self.source)
            .finish()
    }
}

/// 按声明顺序排列的条目表，条目名唯一
#[derive(Debug, Clone, Default)]
pub struct SchemaMap {
    entries: Vec<(String, EntryDeclaration)>,
}

impl SchemaMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> SchemaMapBuilder {
        SchemaMapBuilder::default()
    }

    /// 追加条目，重名返回 `DuplicateEntry`
    pub fn insert(&mut self, name: impl Into<String>, decl: EntryDeclaration) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(DomainError::DuplicateEntry(name));
        }
        self.entries.push((name, decl));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&EntryDeclaration> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, decl)| decl)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntryDeclaration)> {
        self.entries.iter().map(|(key, decl)| (key.as_str(), decl))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 是否有条目会读取注入存储
    pub fn needs_injected(&self) -> bool {
        self.entries.iter().any(|(_, decl)| decl.source.reads_injected())
    }
}

/// 链式构建 [`SchemaMap`]，重名错误延迟到 `build` 报告
#[derive(Debug, Default)]
pub struct SchemaMapBuilder {
    map: SchemaMap,
    duplicate: Option<String>,
}

impl SchemaMapBuilder {
    /// 来源为 `Any` 的条目
    #[must_use]
    pub fn entry(self, name: impl Into<String>, schema: impl Validator + 'static) -> Self {
        self.declare(name, EntryDeclaration::new(schema))
    }

    /// 指定来源的条目
    #[must_use]
    pub fn entry_from(
        self,
        name: impl Into<String>,
        schema: impl Validator + 'static,
        source: EntrySource,
    ) -> Self {
        self.declare(name, EntryDeclaration::new(schema).from_source(source))
    }

    #[must_use]
    pub fn declare(mut self, name: impl Into<String>, decl: EntryDeclaration) -> Self {
        let name = name.into();
        if self.duplicate.is_none()
            && let Err(DomainError::DuplicateEntry(dup)) = self.map.insert(name, decl)
        {
            self.duplicate = Some(dup);
        }
        self
    }

    pub fn build(self) -> Result<SchemaMap> {
        match self.duplicate {
            Some(name) => Err(DomainError::DuplicateEntry(name)),
            None => Ok(self.map),
        }
    }
}
