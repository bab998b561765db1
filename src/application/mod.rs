//! Application Layer - 应用服务
//!
//! 包含：
//! - services: 来源解析、声明表映射、结果缓存

pub mod services;

pub use services::{
    EnvCell, FailurePolicy, SchemaMapper, SourceResolver, resolve_and_validate,
};
