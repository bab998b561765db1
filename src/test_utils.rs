//! 测试工具模块
//!
//! 修改进程环境的测试需配合 `#[serial]`，并持有 [`EnvGuard`] 以便结束时还原。

use std::collections::HashMap;
use std::env;

/// 环境变量守卫 - 释放时还原整个进程环境
pub struct EnvGuard {
    original_vars: HashMap<String, String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    /// 记录当前环境变量
    pub fn new() -> Self {
        let original_vars: HashMap<String, String> = env::vars().collect();
        Self { original_vars }
    }

    /// 设置测试环境变量（自动包装为 unsafe）
    pub fn set_var(&self, key: &str, value: &str) {
        unsafe {
            env::set_var(key, value);
        }
    }

    /// 移除环境变量（自动包装为 unsafe）
    pub fn remove_var(&self, key: &str) {
        unsafe {
            env::remove_var(key);
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // 先移除新增的变量
        let current_vars: Vec<String> = env::vars().map(|(k, _)| k).collect();
        for key in current_vars {
            if !self.original_vars.contains_key(&key) {
                self.remove_var(&key);
            }
        }

        // 再恢复被修改或删除的变量
        for (key, value) in &self.original_vars {
            if env::var(key).ok().as_ref() != Some(value) {
                self.set_var(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_guard_restores_removed_and_added() {
        unsafe {
            env::set_var("ENVZ_GUARD_EXISTING", "original");
        }
        {
            let guard = EnvGuard::new();
            guard.set_var("ENVZ_GUARD_ADDED", "added");
            guard.remove_var("ENVZ_GUARD_EXISTING");
            assert_eq!(env::var("ENVZ_GUARD_ADDED").as_deref(), Ok("added"));
        }
        assert!(env::var("ENVZ_GUARD_ADDED").is_err());
        assert_eq!(env::var("ENVZ_GUARD_EXISTING").as_deref(), Ok("original"));
        unsafe {
            env::remove_var("ENVZ_GUARD_EXISTING");
        }
    }
}
