//! 控制台命令处理
//!
//! 命令分发放在库中，交互式外壳只负责读写终端

use super::printer::{check_vertical_display, PrintMode, Printer};
use crate::algorithm::{Dijkstra, Traversal};
use crate::error::{Error, Result};
use crate::graph::{EdgeId, VertexId};
use crate::import::{export_file, EditorGraph, TextImporter};
use crate::types::{format_length, EdgeData, Point, VertexData};
use serde::Serialize;

/// 控制台命令执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// JSON 输出中的边
#[derive(Debug, Serialize)]
struct EdgeView {
    src: String,
    dst: String,
    length: f64,
}

/// JSON 输出中的距离项
#[derive(Debug, Serialize)]
struct DistanceView {
    vertex: String,
    /// 不可达时为 null
    distance: Option<f64>,
    via: Option<String>,
}

/// JSON 输出中的路径
#[derive(Debug, Serialize)]
struct PathView {
    vertices: Vec<String>,
    length: usize,
    total_weight: f64,
}

/// 控制台会话：持有当前编辑的图
pub struct Session {
    graph: EditorGraph,
    /// 导入时遇到格式错误即中止
    strict: bool,
    /// 算法结果以 JSON 输出
    json: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EditorGraph::new())
    }
}

impl Session {
    pub fn new(graph: EditorGraph) -> Self {
        Self {
            graph,
            strict: false,
            json: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn graph(&self) -> &EditorGraph {
        &self.graph
    }

    /// 解析并执行一条命令
    pub fn execute(&mut self, input: &str) -> CommandResult {
        let (line, vertical) = check_vertical_display(input);
        let printer = Printer::new(if vertical {
            PrintMode::Vertical
        } else {
            PrintMode::Table
        });

        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            return CommandResult::Continue;
        };

        match self.dispatch(&cmd.to_lowercase(), args, &printer) {
            Ok(result) => result,
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }

    fn dispatch(&mut self, cmd: &str, args: &[&str], printer: &Printer) -> Result<CommandResult> {
        let message = match cmd {
            "quit" | "exit" | "q" => return Ok(CommandResult::Exit),
            "help" | "h" | "?" => Printer::print_help(),
            "stats" | "info" => {
                printer.print_stats(self.graph.vertex_count(), self.graph.edge_count())
            }
            "clear" => {
                self.graph.clear();
                "图已清空".to_string()
            }

            "vertices" | "vs" => self.list_vertices(printer),
            "vertex" | "v" => self.add_vertex(args)?,
            "move" => {
                let [name, x, y] = expect_args::<3>(args, "move <名称> <x> <y>")?;
                let id = self.lookup(name)?;
                let location = Point::new(parse_number(x, "x 坐标")?, parse_number(y, "y 坐标")?);
                self.graph
                    .set_vertex_data(id, VertexData::new(name, location))?;
                format!("{} 已移动到 {}", name, location)
            }
            "rename" => {
                let [old, new] = expect_args::<2>(args, "rename <旧名> <新名>")?;
                let id = self.lookup(old)?;
                let location = self
                    .graph
                    .vertex_data(id)
                    .map(VertexData::location)
                    .unwrap_or_default();
                self.graph
                    .set_vertex_data(id, VertexData::new(new, location))?;
                format!("{} 已重命名为 {}", old, new)
            }
            "rm-vertex" | "rmv" => {
                let [name] = expect_args::<1>(args, "rm-vertex <名称>")?;
                let id = self.lookup(name)?;
                self.graph.remove_vertex(id);
                format!("已删除顶点 {}", name)
            }
            "neighbors" | "n" => {
                let [name] = expect_args::<1>(args, "neighbors <名称>")?;
                let id = self.lookup(name)?;
                let names: Vec<String> = self
                    .graph
                    .neighbors(id)
                    .into_iter()
                    .map(|v| self.name_of(v))
                    .collect();
                format!("{} 的邻居: [{}]", name, names.join(", "))
            }

            "edges" | "es" => self.list_edges(printer),
            "edge" | "e" => self.add_or_update_edge(args)?,
            "rm-edge" | "rme" => {
                let [a, b] = expect_args::<2>(args, "rm-edge <a> <b>")?;
                let (a_id, b_id) = (self.lookup(a)?, self.lookup(b)?);
                match self.graph.remove_edge_between(a_id, b_id) {
                    Some(_) => format!("已删除边 {} - {}", a, b),
                    None => return Err(Error::EdgeNotFound(format!("{} - {}", a, b))),
                }
            }

            "bfs" | "dfs" => {
                let [name] = expect_args::<1>(args, "bfs|dfs <起点>")?;
                let start = self.lookup(name)?;
                let traversal = Traversal::new(&self.graph);
                let edges = if cmd == "bfs" {
                    traversal.breadth_first(start)
                } else {
                    traversal.depth_first(start)
                };
                self.render_edges(&edges)?
            }
            "distances" | "dist" => {
                let [name] = expect_args::<1>(args, "distances <源点>")?;
                let source = self.lookup(name)?;
                self.render_distances(source, printer)?
            }
            "path" => {
                let [a, b] = expect_args::<2>(args, "path <起点> <终点>")?;
                let (start, end) = (self.lookup(a)?, self.lookup(b)?);
                self.render_path(start, end)?
            }

            "import" => {
                let [path] = expect_args::<1>(args, "import <文件>")?;
                let stats = TextImporter::new(&mut self.graph)
                    .with_strict(self.strict)
                    .import_file(path)?;
                format!(
                    "导入完成: {} 个顶点, {} 条边, 跳过 {}, 错误 {} ({} ms)",
                    stats.vertices_imported,
                    stats.edges_imported,
                    stats.skipped,
                    stats.errors,
                    stats.duration_ms
                )
            }
            "export" => {
                let [path] = expect_args::<1>(args, "export <文件>")?;
                export_file(&self.graph, path)?;
                format!("已导出到 {}", path)
            }

            other => {
                return Err(Error::Command(format!(
                    "未知命令: {}。输入 'help' 查看帮助。",
                    other
                )))
            }
        };

        Ok(CommandResult::Message(message))
    }

    fn lookup(&self, name: &str) -> Result<VertexId> {
        self.graph
            .vertex_by_data(name)
            .ok_or_else(|| Error::VertexNotFound(name.to_string()))
    }

    fn name_of(&self, id: VertexId) -> String {
        self.graph
            .vertex_data(id)
            .map_or_else(|| id.to_string(), |d| d.name.clone())
    }

    fn add_vertex(&mut self, args: &[&str]) -> Result<String> {
        // 省略名称时按序号命名
        let (name, coords) = match args {
            [] => ((self.graph.vertex_count() + 1).to_string(), &[][..]),
            [name, rest @ ..] => (name.to_string(), rest),
        };
        let location = match coords {
            [] => Point::default(),
            [x, y] => Point::new(parse_number(x, "x 坐标")?, parse_number(y, "y 坐标")?),
            _ => return Err(Error::Command("用法: vertex [名称] [x y]".to_string())),
        };

        match self.graph.add_vertex(VertexData::new(name.clone(), location)) {
            Some(_) => Ok(format!("已添加顶点 {} {}", name, location)),
            None => Err(Error::VertexAlreadyExists(name)),
        }
    }

    fn add_or_update_edge(&mut self, args: &[&str]) -> Result<String> {
        let (a, b, length) = match args {
            [a, b] => (*a, *b, None),
            [a, b, length] => (*a, *b, Some(parse_length(length)?)),
            _ => return Err(Error::Command("用法: edge <a> <b> [长度]".to_string())),
        };
        let (a_id, b_id) = (self.lookup(a)?, self.lookup(b)?);

        if let Some(existing) = self.graph.edge_ref(a_id, b_id) {
            let Some(length) = length else {
                return Err(Error::Command(format!("边 {} - {} 已存在", a, b)));
            };
            if let Some(data) = self.graph.edge_data_mut(existing) {
                data.set_length(length);
            }
            return Ok(format!("边 {} - {} 长度改为 {}", a, b, format_length(length)));
        }

        let length = length.unwrap_or(0.0);
        match self.graph.add_edge(EdgeData::new(length), a_id, b_id) {
            Some(_) => Ok(format!("已添加边 {} - {} ({})", a, b, format_length(length))),
            None => Err(Error::Command(format!("无法连接 {} 与 {}", a, b))),
        }
    }

    fn list_vertices(&self, printer: &Printer) -> String {
        let rows: Vec<Vec<String>> = self
            .graph
            .vertices()
            .map(|v| {
                let data = v.data();
                vec![
                    data.name.clone(),
                    data.location.x.to_string(),
                    data.location.y.to_string(),
                    v.degree().to_string(),
                ]
            })
            .collect();
        printer.print_result(&["name", "x", "y", "degree"], &rows)
    }

    fn list_edges(&self, printer: &Printer) -> String {
        let rows: Vec<Vec<String>> = self
            .graph
            .edges()
            .map(|e| {
                vec![
                    self.name_of(e.src()),
                    self.name_of(e.dst()),
                    format_length(e.data().length),
                ]
            })
            .collect();
        printer.print_result(&["source", "target", "length"], &rows)
    }

    fn render_edges(&self, edges: &[EdgeId]) -> Result<String> {
        if self.json {
            let views: Vec<EdgeView> = edges
                .iter()
                .filter_map(|&id| self.graph.edge(id))
                .map(|e| EdgeView {
                    src: self.name_of(e.src()),
                    dst: self.name_of(e.dst()),
                    length: e.data().length,
                })
                .collect();
            return to_json(&views);
        }

        if edges.is_empty() {
            return Ok("没有经过任何边".to_string());
        }
        let lines: Vec<String> = edges
            .iter()
            .filter_map(|&id| self.graph.edge_label(id))
            .collect();
        Ok(lines.join("\n"))
    }

    fn render_distances(&self, source: VertexId, printer: &Printer) -> Result<String> {
        let paths = Dijkstra::new(&self.graph).run(source);

        if self.json {
            let views: Vec<DistanceView> = paths
                .iter()
                .map(|(v, pair)| DistanceView {
                    vertex: self.name_of(v),
                    distance: pair.is_reachable().then_some(pair.cost),
                    via: pair.home.map(|h| self.name_of(h)),
                })
                .collect();
            return to_json(&views);
        }

        let rows: Vec<Vec<String>> = paths
            .iter()
            .map(|(v, pair)| {
                let distance = if pair.is_reachable() {
                    format_length(pair.cost)
                } else {
                    "∞".to_string()
                };
                let via = pair.home.map_or_else(|| "-".to_string(), |h| self.name_of(h));
                vec![self.name_of(v), distance, via]
            })
            .collect();
        Ok(printer.print_result(&["vertex", "distance", "via"], &rows))
    }

    fn render_path(&self, start: VertexId, end: VertexId) -> Result<String> {
        let result = Dijkstra::new(&self.graph).shortest_path(start, end);

        if self.json {
            let view = result.map(|p| PathView {
                vertices: p.vertices.iter().map(|&v| self.name_of(v)).collect(),
                length: p.length,
                total_weight: p.total_weight,
            });
            return to_json(&view);
        }

        match result {
            Some(path) => {
                let names: Vec<String> = path.vertices.iter().map(|&v| self.name_of(v)).collect();
                Ok(format!(
                    "最短路径: {} (代价 {})",
                    names.join(" -> "),
                    format_length(path.total_weight)
                ))
            }
            None => Err(Error::Unreachable(format!(
                "{} -> {}",
                self.name_of(start),
                self.name_of(end)
            ))),
        }
    }
}

fn expect_args<'a, const N: usize>(args: &[&'a str], usage: &str) -> Result<[&'a str; N]> {
    <[&'a str; N]>::try_from(args).map_err(|_| Error::Command(format!("用法: {}", usage)))
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse::<T>()
        .map_err(|_| Error::Command(format!("无效的{}: {}", what, raw)))
}

/// 长度必须是有限值，NaN 与无穷大会让最短路径失效
fn parse_length(raw: &str) -> Result<f64> {
    let length = parse_number::<f64>(raw, "长度")?;
    if !length.is_finite() {
        return Err(Error::Command(format!("无效的长度: {}", raw)));
    }
    Ok(length)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: CommandResult) -> String {
        match result {
            CommandResult::Message(m) => m,
            other => panic!("unexpected result: {:?}", other),
        }
    }

    fn sample_session() -> Session {
        let mut session = Session::default();
        for cmd in [
            "vertex A 0 0",
            "vertex B 10 0",
            "vertex C 20 0",
            "vertex D 30 0",
            "edge A B 1",
            "edge B C 2",
            "edge A C 5",
            "edge C D 1",
        ] {
            message(session.execute(cmd));
        }
        session
    }

    #[test]
    fn test_build_graph() {
        let session = sample_session();
        assert_eq!(session.graph().vertex_count(), 4);
        assert_eq!(session.graph().edge_count(), 4);
    }

    #[test]
    fn test_quit_and_blank() {
        let mut session = Session::default();
        assert_eq!(session.execute("quit"), CommandResult::Exit);
        assert_eq!(session.execute("   "), CommandResult::Continue);
        assert!(matches!(session.execute("frobnicate"), CommandResult::Error(_)));
    }

    #[test]
    fn test_duplicate_vertex_reports_error() {
        let mut session = sample_session();
        assert!(matches!(session.execute("vertex A"), CommandResult::Error(_)));
        assert_eq!(session.graph().vertex_count(), 4);
    }

    #[test]
    fn test_default_vertex_name() {
        let mut session = Session::default();
        message(session.execute("vertex"));
        message(session.execute("vertex"));
        assert!(session.graph().vertex_by_data("1").is_some());
        assert!(session.graph().vertex_by_data("2").is_some());
    }

    #[test]
    fn test_edit_edge_length() {
        let mut session = sample_session();
        assert!(matches!(session.execute("edge B A"), CommandResult::Error(_)));
        message(session.execute("edge B A 7"));

        let graph = session.graph();
        let a = graph.vertex_by_data("A").unwrap();
        let b = graph.vertex_by_data("B").unwrap();
        let ab = graph.edge_ref(a, b).unwrap();
        assert_eq!(graph.edge_data(ab).map(|d| d.length), Some(7.0));
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_non_finite_length_rejected() {
        let mut session = Session::default();
        message(session.execute("vertex A"));
        message(session.execute("vertex B"));

        for length in ["NaN", "inf", "-inf", "1e400"] {
            let cmd = format!("edge A B {}", length);
            assert!(matches!(session.execute(&cmd), CommandResult::Error(_)));
        }
        assert_eq!(session.graph().edge_count(), 0);

        message(session.execute("edge A B 3"));
        assert!(matches!(session.execute("edge A B NaN"), CommandResult::Error(_)));
        assert_eq!(
            message(session.execute("path A B")),
            "最短路径: A -> B (代价 3.0)"
        );
    }

    #[test]
    fn test_move_and_rename() {
        let mut session = sample_session();
        message(session.execute("move A 5 6"));
        message(session.execute("rename A Z"));
        assert!(matches!(session.execute("rename Z B"), CommandResult::Error(_)));

        let graph = session.graph();
        let z = graph.vertex_by_data("Z").unwrap();
        assert_eq!(graph.vertex_data(z).map(|d| d.location), Some(Point::new(5, 6)));
        assert_eq!(graph.degree(z), 2);
    }

    #[test]
    fn test_traversals() {
        let mut session = sample_session();
        assert_eq!(message(session.execute("bfs A")), "A - B\nA - C\nC - D");
        assert_eq!(message(session.execute("dfs A")), "A - B\nB - C\nC - D");
    }

    #[test]
    fn test_path() {
        let mut session = sample_session();
        assert_eq!(
            message(session.execute("path A D")),
            "最短路径: A -> B -> C -> D (代价 4.0)"
        );

        message(session.execute("vertex X"));
        assert!(matches!(session.execute("path A X"), CommandResult::Error(_)));
    }

    #[test]
    fn test_distances_json() {
        let mut session = sample_session().with_json(true);
        message(session.execute("vertex X"));
        let out = message(session.execute("distances A"));

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[3]["vertex"], "D");
        assert_eq!(rows[3]["distance"], 4.0);
        assert_eq!(rows[3]["via"], "C");
        assert!(rows[4]["distance"].is_null());
    }

    #[test]
    fn test_remove_commands() {
        let mut session = sample_session();
        message(session.execute("rm-edge C A"));
        assert!(matches!(session.execute("rm-edge C A"), CommandResult::Error(_)));
        message(session.execute("rmv B"));

        assert_eq!(session.graph().vertex_count(), 3);
        assert_eq!(session.graph().edge_count(), 1);
        assert!(message(session.execute("neighbors A")).ends_with("[]"));
    }

    #[test]
    fn test_import_export_commands() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.txt");
        let path = path.to_str().unwrap();

        let mut session = sample_session();
        message(session.execute(&format!("export {}", path)));

        let mut fresh = Session::default().with_strict(true);
        let out = message(fresh.execute(&format!("import {}", path)));
        assert!(out.contains("4 个顶点"));
        assert_eq!(fresh.graph().edge_count(), 4);

        message(fresh.execute("clear"));
        assert_eq!(fresh.graph().vertex_count(), 0);
    }
}
