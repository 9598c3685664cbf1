//! 图索引
//!
//! 载荷到顶点 ID、无向端点对到边 ID 的内存索引，用于唯一性检查和快速查找

use crate::graph::edge::{EdgeId, EdgeKey};
use crate::graph::vertex::VertexId;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// 顶点索引
#[derive(Debug, Clone)]
pub struct VertexIndex<V> {
    /// 载荷到顶点 ID 的映射
    data_to_id: HashMap<V, VertexId>,
}

impl<V> Default for VertexIndex<V> {
    fn default() -> Self {
        Self {
            data_to_id: HashMap::new(),
        }
    }
}

impl<V: Eq + Hash> VertexIndex<V> {
    /// 创建新索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加载荷索引
    pub fn insert(&mut self, data: V, id: VertexId) {
        self.data_to_id.insert(data, id);
    }

    /// 通过载荷查找顶点
    pub fn get<Q>(&self, data: &Q) -> Option<VertexId>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data_to_id.get(data).copied()
    }

    pub fn contains<Q>(&self, data: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data_to_id.contains_key(data)
    }

    /// 移除载荷索引
    pub fn remove<Q>(&mut self, data: &Q) -> Option<VertexId>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data_to_id.remove(data)
    }
}

impl<V> VertexIndex<V> {
    pub fn len(&self) -> usize {
        self.data_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_to_id.is_empty()
    }

    pub fn clear(&mut self) {
        self.data_to_id.clear();
    }
}

/// 边索引
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex {
    /// 无向端点对到边 ID 的映射
    key_to_id: HashMap<EdgeKey, EdgeId>,
}

impl EdgeIndex {
    /// 创建新索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加边
    pub fn insert(&mut self, key: EdgeKey, id: EdgeId) {
        self.key_to_id.insert(key, id);
    }

    /// 获取两点之间的边（不区分方向）
    pub fn get_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.key_to_id.get(&EdgeKey::new(a, b)).copied()
    }

    pub fn contains(&self, key: &EdgeKey) -> bool {
        self.key_to_id.contains_key(key)
    }

    /// 移除边
    pub fn remove(&mut self, key: &EdgeKey) -> Option<EdgeId> {
        self.key_to_id.remove(key)
    }

    pub fn len(&self) -> usize {
        self.key_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_id.is_empty()
    }

    pub fn clear(&mut self) {
        self.key_to_id.clear();
    }
}
