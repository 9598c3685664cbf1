//! 图数据结构
//!
//! 顶点与边存放在以稳定 ID 寻址的有序集合中，
//! 载荷唯一性和无向边唯一性由索引保证。

use super::edge::{Edge, EdgeId, EdgeKey};
use super::index::{EdgeIndex, VertexIndex};
use super::vertex::{Vertex, VertexId};
use crate::error::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// 以单个读写锁包裹的图，供需要跨线程共享的调用方使用
pub type SharedGraph<V, E> = Arc<RwLock<Graph<V, E>>>;

/// 图
///
/// 存储上边有方向（源、目标），但所有查询与算法都按无向图处理。
/// 单线程结构，不做内部同步。
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    /// 顶点（插入顺序）
    vertices: IndexMap<VertexId, Vertex<V>>,
    /// 边（插入顺序）
    edges: IndexMap<EdgeId, Edge<E>>,
    /// 载荷索引
    vertex_index: VertexIndex<V>,
    /// 无向边索引
    edge_index: EdgeIndex,
    /// 下一个顶点 ID
    next_vertex_id: u64,
    /// 下一个边 ID
    next_edge_id: u64,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self {
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
            vertex_index: VertexIndex::default(),
            edge_index: EdgeIndex::new(),
            next_vertex_id: 1,
            next_edge_id: 1,
        }
    }
}

impl<V, E> Graph<V, E> {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 包装为 [`SharedGraph`]
    pub fn into_shared(self) -> SharedGraph<V, E> {
        Arc::new(RwLock::new(self))
    }

    // ==================== 顶点查询 ====================

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<V>> {
        self.vertices.get(&id)
    }

    /// 获取顶点载荷
    pub fn vertex_data(&self, id: VertexId) -> Option<&V> {
        self.vertices.get(&id).map(Vertex::data)
    }

    /// 按位置获取顶点
    pub fn vertex_at(&self, index: usize) -> Option<&Vertex<V>> {
        self.vertices.get_index(index).map(|(_, v)| v)
    }

    /// 所有顶点（插入顺序）
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<V>> + '_ {
        self.vertices.values()
    }

    /// 所有顶点 ID（插入顺序）
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ==================== 边查询 ====================

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<E>> {
        self.edges.get(&id)
    }

    /// 获取边载荷
    pub fn edge_data(&self, id: EdgeId) -> Option<&E> {
        self.edges.get(&id).map(Edge::data)
    }

    /// 获取可修改的边载荷
    pub fn edge_data_mut(&mut self, id: EdgeId) -> Option<&mut E> {
        self.edges.get_mut(&id).map(Edge::data_mut)
    }

    /// 按位置获取边
    pub fn edge_at(&self, index: usize) -> Option<&Edge<E>> {
        self.edges.get_index(index).map(|(_, e)| e)
    }

    /// 所有边（插入顺序）
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> + '_ {
        self.edges.values()
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// 获取连接 `a` 与 `b` 的边（不区分方向）
    pub fn edge_ref(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_index.get_between(a, b)
    }

    // ==================== 邻居查询 ====================

    /// 顶点的关联边及对端，按边插入顺序
    ///
    /// 对端按顶点 ID 判定，载荷相等的两个顶点不会混淆。
    pub fn incident_edges(&self, vertex: VertexId) -> Vec<(VertexId, EdgeId)> {
        let Some(v) = self.vertices.get(&vertex) else {
            return Vec::new();
        };
        v.edges()
            .iter()
            .filter_map(|&edge_id| {
                let other = self.edges.get(&edge_id)?.opposite(vertex)?;
                Some((other, edge_id))
            })
            .collect()
    }

    /// 获取顶点的邻居
    pub fn neighbors(&self, vertex: VertexId) -> IndexSet<VertexId> {
        self.incident_edges(vertex)
            .into_iter()
            .map(|(other, _)| other)
            .collect()
    }

    /// 在 `vertex` 自身的关联边中查找通往 `other` 的边
    pub fn edge_to(&self, vertex: VertexId, other: VertexId) -> Option<EdgeId> {
        let v = self.vertices.get(&vertex)?;
        v.edges().iter().copied().find(|edge_id| {
            self.edges
                .get(edge_id)
                .is_some_and(|e| e.opposite(vertex) == Some(other))
        })
    }

    /// 获取顶点的度数
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.vertices.get(&vertex).map_or(0, Vertex::degree)
    }

    /// 不在 `group` 中的顶点
    pub fn other_vertices(&self, group: &IndexSet<VertexId>) -> IndexSet<VertexId> {
        self.vertex_ids().filter(|id| !group.contains(id)).collect()
    }

    /// 一组边的目标顶点
    pub fn endpoints(&self, edges: &[EdgeId]) -> IndexSet<VertexId> {
        edges
            .iter()
            .filter_map(|id| self.edges.get(id))
            .map(Edge::dst)
            .collect()
    }

    /// 一组边的源顶点
    pub fn startpoints(&self, edges: &[EdgeId]) -> IndexSet<VertexId> {
        edges
            .iter()
            .filter_map(|id| self.edges.get(id))
            .map(Edge::src)
            .collect()
    }

    // ==================== 边操作 ====================

    /// 删除边，返回其载荷
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<E> {
        let edge = self.edges.shift_remove(&id)?;
        self.edge_index.remove(&edge.key());

        for endpoint in [edge.src(), edge.dst()] {
            if let Some(v) = self.vertices.get_mut(&endpoint) {
                v.remove_edge_ref(id);
            }
        }

        debug!(edge = %id, src = %edge.src(), dst = %edge.dst(), "edge removed");
        Some(edge.into_data())
    }

    /// 删除 `a` 与 `b` 之间的边（不区分方向），不存在时不做任何事
    pub fn remove_edge_between(&mut self, a: VertexId, b: VertexId) -> Option<E> {
        let id = self.edge_ref(a, b)?;
        self.remove_edge(id)
    }

    /// 清空图
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.vertex_index.clear();
        self.edge_index.clear();
    }
}

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Clone,
{
    // ==================== 顶点操作 ====================

    /// 添加顶点
    ///
    /// 已有顶点的载荷与 `data` 相等时返回 `None`，图保持不变。
    pub fn add_vertex(&mut self, data: V) -> Option<VertexId> {
        if self.vertex_index.contains(&data) {
            debug!("duplicate vertex payload rejected");
            return None;
        }

        let id = VertexId::new(self.next_vertex_id);
        self.next_vertex_id += 1;

        self.vertex_index.insert(data.clone(), id);
        self.vertices.insert(id, Vertex::new(id, data));

        Some(id)
    }

    /// 通过载荷查找顶点
    pub fn vertex_by_data<Q>(&self, data: &Q) -> Option<VertexId>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.vertex_index.get(data)
    }

    /// 替换顶点载荷，返回旧载荷
    ///
    /// 其他顶点已持有相等载荷时拒绝；与自身旧载荷相等是允许的。
    pub fn set_vertex_data(&mut self, id: VertexId, data: V) -> Result<V> {
        if !self.vertices.contains_key(&id) {
            return Err(Error::VertexNotFound(id.to_string()));
        }
        if let Some(owner) = self.vertex_index.get(&data) {
            if owner != id {
                return Err(Error::VertexAlreadyExists(owner.to_string()));
            }
        }

        let vertex = self
            .vertices
            .get_mut(&id)
            .ok_or_else(|| Error::VertexNotFound(id.to_string()))?;
        let old = vertex.replace_data(data.clone());
        self.vertex_index.remove(&old);
        self.vertex_index.insert(data, id);

        Ok(old)
    }

    /// 删除顶点及其所有关联边，返回顶点载荷
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<V> {
        // 先收集，再修改
        let incident: Vec<EdgeId> = self.vertices.get(&id)?.edges().iter().copied().collect();
        for edge_id in incident {
            self.remove_edge(edge_id);
        }

        let vertex = self.vertices.shift_remove(&id)?;
        self.vertex_index.remove(vertex.data());

        debug!(vertex = %id, "vertex removed");
        Some(vertex.into_data())
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// 以下情况返回 `None`，图保持不变：
    /// - `src == dst`（自环）
    /// - 任一端点不在图中
    /// - `src` 与 `dst` 之间已有边（任一方向）
    pub fn add_edge(&mut self, data: E, src: VertexId, dst: VertexId) -> Option<EdgeId> {
        let key = EdgeKey::new(src, dst);
        if key.is_loop() {
            debug!(vertex = %src, "self-loop rejected");
            return None;
        }
        if !self.vertices.contains_key(&src) || !self.vertices.contains_key(&dst) {
            debug!(src = %src, dst = %dst, "edge endpoint not in graph");
            return None;
        }
        if self.edge_index.contains(&key) {
            debug!(src = %src, dst = %dst, "duplicate edge rejected");
            return None;
        }

        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;

        self.edges.insert(id, Edge::new(id, data, src, dst));
        self.edge_index.insert(key, id);
        for endpoint in [src, dst] {
            if let Some(v) = self.vertices.get_mut(&endpoint) {
                v.add_edge_ref(id);
            }
        }

        Some(id)
    }
}

impl<V: fmt::Display, E> Graph<V, E> {
    /// 边的展示文本，形如 `A - B`
    pub fn edge_label(&self, id: EdgeId) -> Option<String> {
        let edge = self.edges.get(&id)?;
        let src = self.vertex_data(edge.src())?;
        let dst = self.vertex_data(edge.dst())?;
        Some(format!("{} - {}", src, dst))
    }
}
