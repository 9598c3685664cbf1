//! PathGraph - 可变无向图与路径算法
//!
//! 顶点与边携带任意载荷的无向图，支持：
//! - 按载荷唯一的顶点、无自环无重边的边
//! - 广度优先 / 深度优先遍历
//! - Dijkstra 最短距离与路径重建
//! - 文本格式的导入导出与交互式编辑器

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod logging;
pub mod types;

// 重导出常用类型
pub use algorithm::{CostHomePair, Dijkstra, PathResult, ShortestPaths, Traversal};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, SharedGraph, Vertex, VertexId};
pub use types::{EdgeData, EdgeWeight, Point, VertexData};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
