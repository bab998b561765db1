//! envz 主程序入口
//!
//! - 成功时静默（check 输出结果除外），通过 --verbose 查看详情
//! - 错误经 miette 渲染到 stderr，退出码 1

use clap::Parser;
use envz::cli::{self, Cli, Commands};
use envz::commands::{
    CheckCommand, CommandContext, CommandHandler, ExplainCommand, InjectCommand,
};
use envz::domain::OutputFormat;

fn main() {
    let cli = Cli::parse();

    // 日志初始化失败不影响命令执行
    let _ = envz::logging::init(cli.verbose);

    let ctx = CommandContext {
        verbose: cli.verbose,
        format: OutputFormat::from(cli.format.as_str()),
    };

    let handler: Box<dyn CommandHandler> = match cli.command {
        Commands::Check {
            injected,
            collect_all,
        } => Box::new(CheckCommand::new(
            cli.schema,
            injected,
            cli::parse_policy(collect_all),
        )),
        Commands::Inject {
            output,
            mode,
            env_dir,
        } => Box::new(InjectCommand::new(cli.schema, output, env_dir, mode)),
        Commands::Explain { injected } => Box::new(ExplainCommand::new(cli.schema, injected)),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = handler.execute(&ctx, &mut out) {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}
