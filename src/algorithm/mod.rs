//! 图算法模块
//!
//! 包含广度优先/深度优先遍历和 Dijkstra 最短路径。
//! 算法只通过 [`Graph`](crate::graph::Graph) 的公开查询接口访问图。

mod dijkstra;
mod traversal;

pub use dijkstra::{CostHomePair, Dijkstra, PathResult, ShortestPaths};
pub use traversal::Traversal;
