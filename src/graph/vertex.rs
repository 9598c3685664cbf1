//! 顶点定义

use crate::graph::edge::EdgeId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（图内唯一，删除后不复用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// 顶点
///
/// 持有载荷以及与之关联的边集合。关联边集合只由 [`Graph`](crate::graph::Graph)
/// 维护，按边插入顺序迭代，因此邻居顺序是确定的。
#[derive(Debug, Clone)]
pub struct Vertex<V> {
    /// 顶点 ID
    id: VertexId,
    /// 载荷
    data: V,
    /// 关联的边
    edges: IndexSet<EdgeId>,
}

impl<V> Vertex<V> {
    pub(crate) fn new(id: VertexId, data: V) -> Self {
        Self {
            id,
            data,
            edges: IndexSet::new(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取载荷
    pub fn data(&self) -> &V {
        &self.data
    }

    /// 关联边（插入顺序）
    pub fn edges(&self) -> &IndexSet<EdgeId> {
        &self.edges
    }

    /// 度数
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }

    pub(crate) fn replace_data(&mut self, data: V) -> V {
        std::mem::replace(&mut self.data, data)
    }

    pub(crate) fn into_data(self) -> V {
        self.data
    }

    pub(crate) fn add_edge_ref(&mut self, edge: EdgeId) {
        self.edges.insert(edge);
    }

    pub(crate) fn remove_edge_ref(&mut self, edge: EdgeId) {
        // shift_remove 保持剩余边的相对顺序
        self.edges.shift_remove(&edge);
    }
}

impl<V: fmt::Display> fmt::Display for Vertex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_edge_refs() {
        let mut v = Vertex::new(VertexId::new(1), "A");
        assert!(!v.has_edges());

        v.add_edge_ref(EdgeId::new(3));
        v.add_edge_ref(EdgeId::new(1));
        v.add_edge_ref(EdgeId::new(2));
        v.add_edge_ref(EdgeId::new(1));
        assert_eq!(v.degree(), 3);

        v.remove_edge_ref(EdgeId::new(1));
        let order: Vec<_> = v.edges().iter().copied().collect();
        assert_eq!(order, vec![EdgeId::new(3), EdgeId::new(2)]);
    }

    #[test]
    fn test_vertex_display() {
        let v = Vertex::new(VertexId::new(7), "Boston");
        assert_eq!(v.to_string(), "Boston");
        assert_eq!(v.id().to_string(), "v7");
    }
}
