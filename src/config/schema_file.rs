//! TOML 声明文件解析
//!
//! 每个 `[[entry]]` 表声明一个条目，文件中的顺序即声明顺序：
//!
//! ```toml
//! [[entry]]
//! name = "PORT"
//! type = "number"
//! source = "process"
//! positive = true
//! default = 3000
//!
//! [[entry]]
//! name = "CANONICAL_URL"
//! type = "string"
//! url = true
//! ```

use crate::domain::error::{DomainError, Result};
use crate::domain::models::{EntryDeclaration, EntrySource, SchemaMap};
use crate::schema;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// 条目的值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    String,
    Number,
    Integer,
    Boolean,
    Enum,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::String => write!(f, "string"),
            EntryKind::Number => write!(f, "number"),
            EntryKind::Integer => write!(f, "integer"),
            EntryKind::Boolean => write!(f, "boolean"),
            EntryKind::Enum => write!(f, "enum"),
        }
    }
}

/// 单个 `[[entry]]` 表
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntrySpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub source: EntrySource,
    #[serde(default)]
    pub optional: bool,
    pub default: Option<toml::Value>,

    // string
    #[serde(default)]
    pub non_empty: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    #[serde(default)]
    pub url: bool,
    #[serde(default)]
    pub trim: bool,

    // number / integer
    #[serde(default)]
    pub positive: bool,
    #[serde(default)]
    pub nonnegative: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,

    // enum
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(rename = "entry", default)]
    entries: Vec<EntrySpec>,
}

impl EntrySpec {
    fn error(&self, message: impl fmt::Display) -> DomainError {
        DomainError::Config(format!("条目 {}: {message}", self.name))
    }

    /// 列出当前类型不支持的约束
    fn inapplicable(&self) -> Vec<&'static str> {
        let string_keys = [
            ("non_empty", self.non_empty),
            ("min_length", self.min_length.is_some()),
            ("max_length", self.max_length.is_some()),
            ("pattern", self.pattern.is_some()),
            ("url", self.url),
            ("trim", self.trim),
        ];
        let number_keys = [
            ("positive", self.positive),
            ("nonnegative", self.nonnegative),
            ("min", self.min.is_some()),
            ("max", self.max.is_some()),
        ];
        let enum_keys = [("values", !self.values.is_empty())];

        let (string_ok, number_ok, enum_ok) = match self.kind {
            EntryKind::String => (true, false, false),
            EntryKind::Number | EntryKind::Integer => (false, true, false),
            EntryKind::Boolean => (false, false, false),
            EntryKind::Enum => (false, false, true),
        };

        let mut keys = Vec::new();
        for (group, allowed) in [
            (&string_keys[..], string_ok),
            (&number_keys[..], number_ok),
            (&enum_keys[..], enum_ok),
        ] {
            if !allowed {
                keys.extend(group.iter().filter(|(_, set)| *set).map(|(k, _)| *k));
            }
        }
        keys
    }

    fn default_string(&self) -> Result<Option<String>> {
        match &self.default {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.error(format!("默认值类型与 {} 不匹配", self.kind))),
        }
    }

    fn default_number(&self) -> Result<Option<f64>> {
        match &self.default {
            None => Ok(None),
            Some(toml::Value::Integer(i)) => Ok(Some(*i as f64)),
            Some(toml::Value::Float(f)) => Ok(Some(*f)),
            Some(_) => Err(self.error(format!("默认值类型与 {} 不匹配", self.kind))),
        }
    }

    fn default_bool(&self) -> Result<Option<bool>> {
        match &self.default {
            None => Ok(None),
            Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
            Some(_) => Err(self.error(format!("默认值类型与 {} 不匹配", self.kind))),
        }
    }

    /// 转换为条目声明
    pub fn to_declaration(&self) -> Result<EntryDeclaration> {
        let inapplicable = self.inapplicable();
        if !inapplicable.is_empty() {
            return Err(self.error(format!(
                "{} 类型不支持 {}",
                self.kind,
                inapplicable.join(", ")
            )));
        }
        if self.optional && self.default.is_some() {
            return Err(self.error("optional 与 default 不能同时使用"));
        }

        let decl = match self.kind {
            EntryKind::String => {
                let mut s = schema::string();
                if self.trim {
                    s = s.trim();
                }
                if self.non_empty {
                    s = s.non_empty();
                }
                if let Some(n) = self.min_length {
                    s = s.min_length(n);
                }
                if let Some(n) = self.max_length {
                    s = s.max_length(n);
                }
                if let Some(pattern) = &self.pattern {
                    let re = Regex::new(pattern)
                        .map_err(|e| self.error(format!("无效的 pattern: {e}")))?;
                    s = s.pattern(re);
                }
                if self.url {
                    s = s.url();
                }
                if self.optional {
                    s = s.optional();
                }
                if let Some(d) = self.default_string()? {
                    s = s.default(d);
                }
                EntryDeclaration::new(s)
            }
            EntryKind::Number | EntryKind::Integer => {
                let mut n = if self.kind == EntryKind::Integer {
                    schema::integer()
                } else {
                    schema::number()
                };
                if self.positive {
                    n = n.positive();
                }
                if self.nonnegative {
                    n = n.nonnegative();
                }
                if let Some(min) = self.min {
                    n = n.min(min);
                }
                if let Some(max) = self.max {
                    n = n.max(max);
                }
                if self.optional {
                    n = n.optional();
                }
                if let Some(d) = self.default_number()? {
                    n = n.default(d);
                }
                EntryDeclaration::new(n)
            }
            EntryKind::Boolean => {
                let mut b = schema::boolean();
                if self.optional {
                    b = b.optional();
                }
                if let Some(d) = self.default_bool()? {
                    b = b.default(d);
                }
                EntryDeclaration::new(b)
            }
            EntryKind::Enum => {
                if self.values.is_empty() {
                    return Err(self.error("enum 类型必须提供 values"));
                }
                let mut c = schema::one_of(self.values.iter().cloned());
                if self.optional {
                    c = c.optional();
                }
                if let Some(d) = self.default_string()? {
                    c = c.default(d);
                }
                EntryDeclaration::new(c)
            }
        };

        Ok(decl.from_source(self.source))
    }
}

/// 解析声明文件内容
pub fn parse_schema_file(content: &str) -> Result<SchemaMap> {
    let file: SchemaFile = toml::from_str(content)?;
    let mut map = SchemaMap::new();
    for spec in &file.entries {
        if spec.name.trim().is_empty() {
            return Err(DomainError::Config("条目名不能为空".to_string()));
        }
        map.insert(spec.name.clone(), spec.to_declaration()?)?;
    }
    debug!(entries = map.len(), "已加载声明文件");
    Ok(map)
}

/// 读取声明文件
pub fn load_schema_file(path: &Path) -> Result<SchemaMap> {
    if !path.exists() {
        return Err(DomainError::Config(format!(
            "声明文件不存在: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    parse_schema_file(&content)
}
