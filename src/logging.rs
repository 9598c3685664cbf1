//! 日志初始化
//!
//! 库内部只发出 tracing 事件，订阅器由可执行程序在启动时安装。

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 根据命令行参数初始化日志，输出到 stderr
///
/// 优先级：`RUST_LOG` > `PATHGRAPH_LOG` > `log_level` > `verbose`。
pub fn init_tracing(verbose: bool, log_level: Option<&str>) -> crate::Result<()> {
    let level = match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("pathgraph={}", level),
        (true, None) => "pathgraph=debug".to_string(),
        (false, None) => "pathgraph=warn".to_string(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("PATHGRAPH_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| crate::Error::Command(format!("日志初始化失败: {}", e)))
}
