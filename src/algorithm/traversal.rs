//! 图遍历算法
//!
//! 广度优先与深度优先遍历，返回遍历过程中经过的边

use crate::graph::{EdgeId, Graph, VertexId};
use std::collections::{HashSet, VecDeque};
use tracing::trace;

/// 遍历器
///
/// 起点必须属于图；传入不存在的顶点时结果为空序列。
pub struct Traversal<'g, V, E> {
    graph: &'g Graph<V, E>,
}

/// 深度优先的显式栈帧
struct Frame {
    /// 进入该顶点时的邻居快照
    neighbors: Vec<(VertexId, EdgeId)>,
    next: usize,
    /// 下降到该顶点所经过的边
    via: Option<EdgeId>,
}

impl<'g, V, E> Traversal<'g, V, E> {
    /// 创建遍历器
    pub fn new(graph: &'g Graph<V, E>) -> Self {
        Self { graph }
    }

    /// 广度优先遍历
    ///
    /// 返回按发现顺序排列的树边。邻居按边插入顺序访问，结果可复现。
    pub fn breadth_first(&self, start: VertexId) -> Vec<EdgeId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let mut traversed = Vec::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for (neighbor, edge) in self.graph.incident_edges(current) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                    traversed.push(edge);
                }
            }
        }

        trace!(start = %start, edges = traversed.len(), "breadth-first traversal done");
        traversed
    }

    /// 深度优先遍历
    ///
    /// 每完成一次下降，就把下降所用的边插到结果最前面，
    /// 因此最后回溯的边排在最前。用显式栈实现，深图不会耗尽调用栈。
    pub fn depth_first(&self, start: VertexId) -> Vec<EdgeId> {
        let mut visited = HashSet::new();
        let mut closed = Vec::new();

        visited.insert(start);
        let mut stack = vec![Frame {
            neighbors: self.graph.incident_edges(start),
            next: 0,
            via: None,
        }];

        while let Some(frame) = stack.last_mut() {
            if let Some(&(neighbor, edge)) = frame.neighbors.get(frame.next) {
                frame.next += 1;
                if visited.insert(neighbor) {
                    stack.push(Frame {
                        neighbors: self.graph.incident_edges(neighbor),
                        next: 0,
                        via: Some(edge),
                    });
                }
            } else {
                let via = frame.via;
                stack.pop();
                if let Some(edge) = via {
                    closed.push(edge);
                }
            }
        }

        // 按完成顺序收集，反转后等价于逐个插到最前
        closed.reverse();

        trace!(start = %start, edges = closed.len(), "depth-first traversal done");
        closed
    }
}
