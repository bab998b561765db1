//! 解析结果模型

use crate::domain::error::{DomainError, Result};
use crate::domain::models::EntrySource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// 一次解析得到的原始值，校验前的中间产物
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEntry {
    pub key: String,
    /// 声明的来源
    pub declared: EntrySource,
    /// 实际命中的存储（`Process` 或 `Injected`），缺失时为 `None`
    pub origin: Option<EntrySource>,
    #[serde(skip)]
    pub value: Option<String>,
}

impl RawEntry {
    #[must_use]
    pub fn absent(key: String, declared: EntrySource) -> Self {
        Self {
            key,
            declared,
            origin: None,
            value: None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// 校验完成的类型化结果：条目名 → 值
///
/// 只有全部条目都通过校验时才会构造出来。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ResolvedEnv {
    values: BTreeMap<String, Value>,
}

impl ResolvedEnv {
    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// 将单个条目反序列化为目标类型
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .get(key)
            .ok_or_else(|| DomainError::NotFound(key.to_string()))?;
        serde_json::from_value(value.clone())
            .map_err(|e| DomainError::Serialization(format!("{key}: {e}")))
    }

    /// 将整个结果反序列化为结构体
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(serde_json::to_value(&self.values)?)?)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// KEY=VALUE 形式，字符串不加引号，缺失值输出为空
    #[must_use]
    pub fn to_dotenv(&self) -> String {
        self.values
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{k}={s}"),
                Value::Null => format!("{k}="),
                other => format!("{k}={other}"),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.values)?)
    }
}
