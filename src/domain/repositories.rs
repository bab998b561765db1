//! 存储接口定义（输出端口）

use std::collections::{BTreeMap, HashMap};

/// 只读的键值存储
///
/// 解析过程中不会修改任何存储。
pub trait EnvStore: Send + Sync {
    /// 按名称读取原始值
    fn get(&self, key: &str) -> Option<String>;

    /// 存储名称（日志用）
    fn name(&self) -> &'static str;
}

impl EnvStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn name(&self) -> &'static str {
        "map"
    }
}

impl EnvStore for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }

    fn name(&self) -> &'static str {
        "map"
    }
}
