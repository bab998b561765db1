//! 日志初始化

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// 日志级别环境变量
pub const LOG_ENV: &str = "ENVZ_LOG";

/// 安装 tracing 订阅器，输出到 stderr
///
/// 级别读取 `ENVZ_LOG`，未设置时默认 `warn`，详细模式下为 `debug`。
/// 只能初始化一次，重复调用返回错误。
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = if verbose { "debug" } else { "warn" };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let filter_layer =
        EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
