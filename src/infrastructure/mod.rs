//! Infrastructure Layer - 技术实现
//!
//! 包含：
//! - process_store: 进程环境变量存储
//! - injected_store: 构建期注入存储与注入清单
//! - dotenv_store: 构建期 .env 文件加载

pub mod dotenv_store;
pub mod injected_store;
pub mod process_store;

pub use dotenv_store::{DEFAULT_MODE, DotenvStore};

pub use injected_store::{INJECTION_NAMESPACE, InjectedStore};
pub use process_store::{MemoryStore, ProcessStore};
