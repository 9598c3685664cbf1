//! 控制台命令补全器
//!
//! 基于 rustyline 实现 Tab 补全功能

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 控制台命令列表
const COMMANDS: &[&str] = &[
    // 基础
    "help", "quit", "exit", "stats", "info", "clear",
    // 顶点
    "vertices", "vertex", "move", "rename", "rm-vertex", "neighbors",
    // 边
    "edges", "edge", "rm-edge",
    // 算法
    "bfs", "dfs", "distances", "path",
    // 文件
    "import", "export",
];

/// PathGraph CLI 补全器
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    /// 返回以 `prefix` 开头的命令
    pub fn candidates(prefix: &str) -> Vec<&'static str> {
        let prefix = prefix.to_lowercase();
        COMMANDS
            .iter()
            .copied()
            .filter(|cmd| cmd.starts_with(&prefix))
            .collect()
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let leading = line_to_cursor.len() - line_to_cursor.trim_start().len();
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();

        // 只补全命令名，参数不补全
        let current = match words.as_slice() {
            [] => "",
            [word] if !line_to_cursor.ends_with(char::is_whitespace) => *word,
            _ => return Ok((pos, vec![])),
        };

        let completions = Self::candidates(current)
            .into_iter()
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((leading, completions))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
