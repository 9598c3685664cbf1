//! 文本导入导出模块
//!
//! 每行一条记录，字段以空白分隔：
//!
//! ```text
//! v <x> <y> <名称>
//! e <长度> <源顶点名称> <目标顶点名称>
//! ```
//!
//! 首个字段不是 `v` 或 `e` 的行会被忽略。

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::{format_length, EdgeData, Point, VertexData};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// 编辑器使用的图：顶点按名称唯一，边权为长度
pub type EditorGraph = Graph<VertexData, EdgeData>;

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    /// 重名顶点、端点未知、自环或重复的边
    pub skipped: usize,
    /// 格式错误的行
    pub errors: usize,
    pub duration_ms: u64,
}

/// 一条解析后的记录
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Vertex { name: String, location: Point },
    Edge { length: f64, src: String, dst: String },
}

/// 解析一行
///
/// 空行与无关行返回 `Ok(None)`，格式错误返回错误描述。
pub fn parse_line(line: &str) -> std::result::Result<Option<Record>, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.first().copied() {
        Some("v") => {
            if fields.len() < 4 {
                return Err(format!("顶点记录需要 4 个字段，实际 {} 个", fields.len()));
            }
            let x = parse_field::<i32>(fields[1], "x 坐标")?;
            let y = parse_field::<i32>(fields[2], "y 坐标")?;
            Ok(Some(Record::Vertex {
                name: fields[3].to_string(),
                location: Point::new(x, y),
            }))
        }
        Some("e") => {
            if fields.len() < 4 {
                return Err(format!("边记录需要 4 个字段，实际 {} 个", fields.len()));
            }
            let length = parse_field::<f64>(fields[1], "长度")?;
            if !length.is_finite() {
                return Err(format!("无效的长度: {}", fields[1]));
            }
            Ok(Some(Record::Edge {
                length,
                src: fields[2].to_string(),
                dst: fields[3].to_string(),
            }))
        }
        _ => Ok(None),
    }
}

fn parse_field<T: std::str::FromStr>(raw: &str, what: &str) -> std::result::Result<T, String> {
    raw.parse::<T>()
        .map_err(|_| format!("无效的{}: {}", what, raw))
}

/// 文本导入器
pub struct TextImporter<'g> {
    graph: &'g mut EditorGraph,
    strict: bool,
}

impl<'g> TextImporter<'g> {
    /// 创建导入器，记录追加到 `graph` 中
    pub fn new(graph: &'g mut EditorGraph) -> Self {
        Self {
            graph,
            strict: false,
        }
    }

    /// 严格模式：遇到第一条格式错误的记录即中止
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 从字符串导入
    pub fn import_str(&mut self, text: &str) -> Result<ImportStats> {
        let start = Instant::now();
        let mut stats = ImportStats::default();

        for (i, line) in text.lines().enumerate() {
            self.import_line(i + 1, line, &mut stats)?;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            skipped = stats.skipped,
            errors = stats.errors,
            "import finished"
        );
        Ok(stats)
    }

    /// 从文件导入
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let start = Instant::now();
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let mut stats = ImportStats::default();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            self.import_line(i + 1, &line, &mut stats)?;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            path = %path.as_ref().display(),
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            skipped = stats.skipped,
            errors = stats.errors,
            "import finished"
        );
        Ok(stats)
    }

    fn import_line(&mut self, line_no: usize, line: &str, stats: &mut ImportStats) -> Result<()> {
        let record = match parse_line(line) {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(()),
            Err(message) => {
                if self.strict {
                    return Err(Error::Parse {
                        line: line_no,
                        message,
                    });
                }
                warn!(line = line_no, error = %message, "malformed record skipped");
                stats.errors += 1;
                return Ok(());
            }
        };

        match record {
            Record::Vertex { name, location } => {
                match self.graph.add_vertex(VertexData::new(name, location)) {
                    Some(_) => stats.vertices_imported += 1,
                    None => stats.skipped += 1,
                }
            }
            Record::Edge { length, src, dst } => {
                let endpoints = (
                    self.graph.vertex_by_data(src.as_str()),
                    self.graph.vertex_by_data(dst.as_str()),
                );
                let added = match endpoints {
                    (Some(s), Some(d)) => self.graph.add_edge(EdgeData::new(length), s, d),
                    _ => None,
                };
                match added {
                    Some(_) => stats.edges_imported += 1,
                    None => stats.skipped += 1,
                }
            }
        }

        Ok(())
    }
}

/// 读取文件生成新图
pub fn load_file<P: AsRef<Path>>(path: P, strict: bool) -> Result<(EditorGraph, ImportStats)> {
    let mut graph = EditorGraph::new();
    let stats = TextImporter::new(&mut graph)
        .with_strict(strict)
        .import_file(path)?;
    Ok((graph, stats))
}

/// 导出为文本：先顶点后边，各自按插入顺序
pub fn export_text(graph: &EditorGraph) -> String {
    let mut out = String::new();

    for v in graph.vertices() {
        let data = v.data();
        out.push_str(&format!(
            "v {} {} {}\n",
            data.location.x, data.location.y, data.name
        ));
    }

    for e in graph.edges() {
        let (Some(src), Some(dst)) = (graph.vertex_data(e.src()), graph.vertex_data(e.dst())) else {
            continue;
        };
        out.push_str(&format!(
            "e {} {} {}\n",
            format_length(e.data().length),
            src.name,
            dst.name
        ));
    }

    out
}

/// 导出到文件
pub fn export_file<P: AsRef<Path>>(graph: &EditorGraph, path: P) -> Result<()> {
    let mut file = File::create(path.as_ref())?;
    file.write_all(export_text(graph).as_bytes())?;
    info!(
        path = %path.as_ref().display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "export finished"
    );
    Ok(())
}
