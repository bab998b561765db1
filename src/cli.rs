//! CLI 参数定义

use crate::application::services::FailurePolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// envz - 类型安全的环境变量解析与校验
#[derive(Parser, Debug)]
#[command(
    name = "envz",
    version,
    about = "类型安全的环境变量解析与校验",
    long_about = "按声明文件从进程环境和构建期注入清单中解析环境变量，并逐个校验、转换为类型化的值"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 声明文件路径
    #[arg(short, long, global = true, env = "ENVZ_SCHEMA", default_value = "envz.toml")]
    pub schema: PathBuf,

    /// 输出格式 (env/json)
    #[arg(short, long, global = true, default_value = "env")]
    pub format: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 解析并校验环境变量，成功时输出结果
    Check {
        /// 注入清单路径
        #[arg(short, long, env = "ENVZ_INJECTED")]
        injected: Option<PathBuf>,
        /// 收集全部校验失败，而不是遇到第一个就停止
        #[arg(long)]
        collect_all: bool,
    },

    /// 构建期捕获：把声明的条目从 .env 文件和当前环境写入注入清单
    Inject {
        /// 注入清单输出路径
        #[arg(short, long, default_value = "envz.injected.json")]
        output: PathBuf,
        /// 构建模式，决定读取 .env.<mode> 与 .env.<mode>.local
        #[arg(short, long, default_value = crate::infrastructure::DEFAULT_MODE)]
        mode: String,
        /// .env 文件所在目录
        #[arg(long, default_value = ".")]
        env_dir: PathBuf,
    },

    /// 显示每个条目的实际来源与校验结果
    Explain {
        /// 注入清单路径
        #[arg(short, long, env = "ENVZ_INJECTED")]
        injected: Option<PathBuf>,
    },
}

/// 解析失败策略参数
pub fn parse_policy(collect_all: bool) -> FailurePolicy {
    if collect_all {
        FailurePolicy::CollectAll
    } else {
        FailurePolicy::FailFast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "envz",
            "--schema",
            "app.toml",
            "check",
            "--injected",
            "dist/envz.json",
            "--collect-all",
        ])
        .unwrap();
        assert_eq!(cli.schema, PathBuf::from("app.toml"));
        match cli.command {
            Commands::Check {
                injected,
                collect_all,
            } => {
                assert_eq!(injected, Some(PathBuf::from("dist/envz.json")));
                assert_eq!(parse_policy(collect_all), FailurePolicy::CollectAll);
            }
            other => panic!("应为 check: {other:?}"),
        }
    }

    #[test]
    fn test_parse_inject_defaults() {
        let cli = Cli::try_parse_from(["envz", "inject"]).unwrap();
        match cli.command {
            Commands::Inject {
                output,
                mode,
                env_dir,
            } => {
                assert_eq!(output, PathBuf::from("envz.injected.json"));
                assert_eq!(mode, "production");
                assert_eq!(env_dir, PathBuf::from("."));
            }
            other => panic!("应为 inject: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["envz", "explain", "-f", "json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, "json");
    }
}
