//! PathGraph CLI 工具
//!
//! 交互式图编辑器

use anyhow::Context as _;
use clap::Parser;
use colored::Colorize;
use pathgraph::cli::{CommandCompleter, CommandResult, Session};
use pathgraph::import::{load_file, EditorGraph};
use pathgraph::logging::init_tracing;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "pathgraph-cli")]
#[command(about = "PathGraph 命令行图编辑器")]
#[command(version)]
struct Args {
    /// 启动时导入的图文件
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 执行单条命令后退出，可重复指定
    #[arg(short = 'e', long)]
    execute: Vec<String>,

    /// 导入时遇到格式错误立即中止
    #[arg(long)]
    strict: bool,

    /// 算法结果以 JSON 输出
    #[arg(long)]
    json: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.log_level.as_deref())?;

    let graph = match &args.input {
        Some(path) => {
            let (graph, stats) = load_file(path, args.strict)
                .with_context(|| format!("无法导入 {}", path.display()))?;
            if stats.errors > 0 || stats.skipped > 0 {
                warn!(errors = stats.errors, skipped = stats.skipped, "import incomplete");
            }
            graph
        }
        None => EditorGraph::new(),
    };

    let mut session = Session::new(graph)
        .with_strict(args.strict)
        .with_json(args.json);

    // 批处理模式
    if !args.execute.is_empty() {
        for command in &args.execute {
            match session.execute(command) {
                CommandResult::Exit => break,
                CommandResult::Error(e) => anyhow::bail!("{}: {}", command, e),
                result => print_result(result),
            }
        }
        return Ok(());
    }

    run_repl(session)
}

fn run_repl(mut session: Session) -> anyhow::Result<()> {
    println!("{}", "PathGraph CLI - 无向图编辑器".bold());
    println!(
        "顶点数: {}  边数: {}",
        session.graph().vertex_count(),
        session.graph().edge_count()
    );
    println!("输入 'help' 查看命令列表，'quit' 退出\n");

    let mut editor: Editor<CommandCompleter, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CommandCompleter::new()));

    let history = dirs::home_dir().map(|home| home.join(".pathgraph_history"));
    if let Some(path) = &history {
        // 首次运行时历史文件不存在
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("pathgraph> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                match session.execute(&line) {
                    CommandResult::Exit => break,
                    result => print_result(result),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            warn!(error = %e, "failed to save history");
        }
    }

    println!("再见！");
    Ok(())
}

fn print_result(result: CommandResult) {
    match result {
        CommandResult::Message(message) => println!("{}", message.trim_end()),
        CommandResult::Error(e) => eprintln!("{} {}", "错误:".red().bold(), e),
        CommandResult::Continue | CommandResult::Exit => {}
    }
}
