//! 边定义
//!
//! 边按 (源, 目标) 存储，但相等性与遍历都是无向的：
//! A→B 与 B→A 视为同一条边。

use crate::graph::vertex::VertexId;
use crate::types::EdgeWeight;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// 边 ID（图内唯一，删除后不复用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// 无序顶点对，用作边的相等性/哈希键
///
/// 构造时对端点排序，因此 `EdgeKey::new(a, b) == EdgeKey::new(b, a)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    low: VertexId,
    high: VertexId,
}

impl EdgeKey {
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn is_loop(&self) -> bool {
        self.low == self.high
    }
}

/// 边
#[derive(Debug, Clone)]
pub struct Edge<E> {
    /// 边 ID
    id: EdgeId,
    /// 源顶点（仅用于展示）
    src: VertexId,
    /// 目标顶点（仅用于展示）
    dst: VertexId,
    /// 载荷
    data: E,
}

impl<E> Edge<E> {
    pub(crate) fn new(id: EdgeId, data: E, src: VertexId, dst: VertexId) -> Self {
        Self { id, src, dst, data }
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 获取源顶点
    pub fn src(&self) -> VertexId {
        self.src
    }

    /// 获取目标顶点
    pub fn dst(&self) -> VertexId {
        self.dst
    }

    /// 获取载荷
    pub fn data(&self) -> &E {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut E {
        &mut self.data
    }

    pub(crate) fn into_data(self) -> E {
        self.data
    }

    /// 无向键
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.src, self.dst)
    }

    /// 是否以 `vertex` 为端点
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.src == vertex || self.dst == vertex
    }

    /// 是否连接 `a` 与 `b`（不区分方向）
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        self.key() == EdgeKey::new(a, b)
    }

    /// 获取 `vertex` 的对端；`vertex` 不是端点时返回 `None`
    ///
    /// 按顶点 ID 比较，从不比较载荷。
    pub fn opposite(&self, vertex: VertexId) -> Option<VertexId> {
        if vertex == self.src {
            Some(self.dst)
        } else if vertex == self.dst {
            Some(self.src)
        } else {
            None
        }
    }
}

impl<E: EdgeWeight> Edge<E> {
    /// 边权：数值载荷取其值，否则为 0
    pub fn weight(&self) -> f64 {
        self.data.numeric_value().unwrap_or(0.0)
    }
}

impl<E> PartialEq for Edge<E> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<E> Eq for Edge<E> {}

impl<E> Hash for Edge<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_undirected_equality() {
        let a = VertexId::new(1);
        let b = VertexId::new(2);
        let forward = Edge::new(EdgeId::new(1), 5u32, a, b);
        let backward = Edge::new(EdgeId::new(2), 9u32, b, a);

        assert_eq!(forward, backward);
        assert_eq!(forward.key(), backward.key());
        assert!(forward.connects(b, a));
        assert_eq!(forward.src(), a);
        assert_eq!(backward.src(), b);
    }

    #[test]
    fn test_edge_opposite() {
        let e = Edge::new(EdgeId::new(1), (), VertexId::new(4), VertexId::new(9));
        assert_eq!(e.opposite(VertexId::new(4)), Some(VertexId::new(9)));
        assert_eq!(e.opposite(VertexId::new(9)), Some(VertexId::new(4)));
        assert_eq!(e.opposite(VertexId::new(5)), None);
    }

    #[test]
    fn test_edge_weight() {
        let numeric = Edge::new(EdgeId::new(1), 2.5f64, VertexId::new(1), VertexId::new(2));
        assert_eq!(numeric.weight(), 2.5);

        let label = Edge::new(EdgeId::new(2), "ferry", VertexId::new(1), VertexId::new(2));
        assert_eq!(label.weight(), 0.0);
    }

    #[test]
    fn test_edge_key_loop() {
        assert!(EdgeKey::new(VertexId::new(3), VertexId::new(3)).is_loop());
        assert!(!EdgeKey::new(VertexId::new(3), VertexId::new(1)).is_loop());
    }
}
