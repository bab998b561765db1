//! 构建期 .env 文件加载
//!
//! 按以下顺序读取，后者覆盖前者，文件不存在则跳过：
//!
//! 1. `.env`
//! 2. `.env.local`
//! 3. `.env.<mode>`
//! 4. `.env.<mode>.local`
//!
//! 进程环境变量优先级最高，见 [`DotenvStore::over_process`]。

use super::process_store::{MemoryStore, ProcessStore};
use crate::domain::error::{DomainError, Result};
use crate::domain::repositories::EnvStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 构建模式的默认值
pub const DEFAULT_MODE: &str = "production";

/// 给定模式下按优先级从低到高排列的 .env 文件名
pub fn dotenv_files(mode: &str) -> [String; 4] {
    [
        ".env".to_string(),
        ".env.local".to_string(),
        format!(".env.{mode}"),
        format!(".env.{mode}.local"),
    ]
}

/// 从 .env 文件合并出的键值存储
#[derive(Debug, Clone, Default)]
pub struct DotenvStore {
    values: HashMap<String, String>,
    loaded: Vec<PathBuf>,
}

impl DotenvStore {
    /// 读取 `dir` 下该模式的全部 .env 文件
    pub fn load(dir: &Path, mode: &str) -> Result<Self> {
        if mode.is_empty() || mode == "local" {
            return Err(DomainError::Config(format!(
                "无效的模式 \"{mode}\": 与 .env.local 后缀冲突或为空"
            )));
        }

        let mut store = Self::default();
        for name in dotenv_files(mode) {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            let pairs = Self::parse(&content).map_err(|e| match e {
                DomainError::Parse(msg) => DomainError::Parse(format!("{}: {msg}", path.display())),
                other => other,
            })?;
            debug!(path = %path.display(), entries = pairs.len(), "已读取 .env 文件");
            store.values.extend(pairs);
            store.loaded.push(path);
        }
        Ok(store)
    }

    /// 解析 .env 内容
    ///
    /// 规则：
    /// - 忽略空行和以 # 开头的注释行
    /// - 格式：KEY=VALUE，可带 `export ` 前缀
    /// - 以 \ 结尾的行与下一行拼接
    /// - 引号包围的值去掉引号，双引号内的 `\n` 转为换行
    /// - 未加引号的值中 ` #` 之后为注释
    pub fn parse(content: &str) -> Result<Vec<(String, String)>> {
        let mut pairs = Vec::new();
        let lines: Vec<&str> = content.lines().collect();
        let mut line_num = 0;

        while line_num < lines.len() {
            let line = lines[line_num].trim();

            if line.is_empty() || line.starts_with('#') {
                line_num += 1;
                continue;
            }

            let mut value_end = line_num;
            let mut complete_line = line.to_string();
            while complete_line.ends_with('\\') && value_end + 1 < lines.len() {
                complete_line.pop();
                value_end += 1;
                complete_line.push_str(lines[value_end].trim());
            }
            line_num = value_end + 1;

            let Some((key, value)) = complete_line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let key = key.strip_prefix("export ").map_or(key, str::trim_start);
            if key.is_empty() {
                return Err(DomainError::Parse(format!("空的键名在行 '{complete_line}'")));
            }
            pairs.push((key.to_string(), unquote(value.trim())));
        }

        Ok(pairs)
    }

    /// 实际读取到的文件
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.loaded
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 叠加当前进程环境，同名时进程环境胜出
    pub fn over_process(self) -> MemoryStore {
        let files: MemoryStore = self.values.into_iter().collect();
        files.overlay(ProcessStore::snapshot())
    }
}

fn unquote(value: &str) -> String {
    for quote in ['"', '\'', '`'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            let inner = &value[1..value.len() - 1];
            return if quote == '"' {
                inner.replace("\\n", "\n")
            } else {
                inner.to_string()
            };
        }
    }
    match value.find(" #") {
        Some(pos) => value[..pos].trim_end().to_string(),
        None => value.to_string(),
    }
}

impl EnvStore for DotenvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn name(&self) -> &'static str {
        "dotenv"
    }
}
