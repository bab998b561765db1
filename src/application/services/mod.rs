//! 应用服务

pub mod context;
pub mod mapper;
pub mod resolver;

pub use context::EnvCell;
pub use mapper::{FailurePolicy, SchemaMapper, resolve_and_validate};
pub use resolver::SourceResolver;
