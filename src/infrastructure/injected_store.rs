//! 构建期注入存储
//!
//! 注入清单是一个 JSON 对象，条目放在 [`INJECTION_NAMESPACE`] 命名空间下：
//!
//! ```json
//! { "z.serverOnly": { "APP_VERSION": "1.4.0", "CANONICAL_URL": "https://example.com" } }
//! ```
//!
//! 命名空间缺失表示注入从未运行，由上层报告 `MissingInjection`。

use crate::domain::error::{DomainError, Result};
use crate::domain::models::SchemaMap;
use crate::domain::repositories::EnvStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// 注入清单中存放条目的命名空间
pub const INJECTION_NAMESPACE: &str = "z.serverOnly";

/// 构建期注入的键值存储
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InjectedStore {
    values: BTreeMap<String, String>,
}

impl InjectedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 构建期捕获：只复制声明表中出现且在 `source` 中存在的条目
    pub fn capture(map: &SchemaMap, source: &dyn EnvStore) -> Self {
        let values: BTreeMap<String, String> = map
            .keys()
            .filter_map(|key| source.get(key).map(|value| (key.to_string(), value)))
            .collect();
        debug!(
            declared = map.len(),
            captured = values.len(),
            store = source.name(),
            "捕获注入条目"
        );
        Self { values }
    }

    /// 从注入清单中取出命名空间
    ///
    /// 同时接受扁平键 `"z.serverOnly"` 和嵌套形式 `{"z": {"serverOnly": ...}}`。
    /// 命名空间不存在时返回 `Ok(None)`。
    pub fn from_manifest(manifest: &Value) -> Result<Option<Self>> {
        let root = manifest
            .as_object()
            .ok_or_else(|| DomainError::Parse("注入清单必须是 JSON 对象".to_string()))?;

        let namespace = root.get(INJECTION_NAMESPACE).or_else(|| {
            let (outer, inner) = INJECTION_NAMESPACE.split_once('.')?;
            root.get(outer)?.get(inner)
        });

        let Some(namespace) = namespace else {
            return Ok(None);
        };

        let entries = namespace.as_object().ok_or_else(|| {
            DomainError::Parse(format!("注入命名空间 {INJECTION_NAMESPACE} 必须是对象"))
        })?;

        let mut values = BTreeMap::new();
        for (key, value) in entries {
            let raw = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => continue,
                Value::Array(_) | Value::Object(_) => {
                    return Err(DomainError::Parse(format!("注入值 {key} 不是标量")));
                }
            };
            values.insert(key.clone(), raw);
        }

        Ok(Some(Self { values }))
    }

    /// 解析 JSON 文本形式的注入清单（可配合 `include_str!` 使用）
    pub fn from_json_str(content: &str) -> Result<Option<Self>> {
        let manifest: Value = serde_json::from_str(content)?;
        Self::from_manifest(&manifest)
    }

    /// 生成注入清单
    #[must_use]
    pub fn to_manifest(&self) -> Value {
        let entries: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let mut root = Map::new();
        root.insert(INJECTION_NAMESPACE.to_string(), Value::Object(entries));
        Value::Object(root)
    }

    /// 读取注入清单文件，文件不存在视为从未注入
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            debug!(path = %path.display(), "注入清单不存在");
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 写入注入清单文件
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.to_manifest())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InjectedStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvStore for InjectedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn name(&self) -> &'static str {
        "injected"
    }
}
