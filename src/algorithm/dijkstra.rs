//! 单源最短路径（Dijkstra）
//!
//! 每轮从未访问集合中选出当前代价最小的顶点，再松弛其未访问的邻居。
//! 边权来自边载荷的 [`EdgeWeight`] 实现，非数值载荷按 0 计。
//! 前置条件：边权非负，负权不做检查。

use crate::error::{Error, Result};
use crate::graph::{Edge, EdgeId, Graph, VertexId};
use crate::types::EdgeWeight;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// 顶点到源点的累计代价，以及取得该代价时的前驱（“回家”方向的下一跳）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostHomePair {
    /// 累计代价，不可达时为正无穷
    pub cost: f64,
    /// 前驱顶点，源点和不可达顶点为 `None`
    pub home: Option<VertexId>,
}

impl CostHomePair {
    fn unreached() -> Self {
        Self {
            cost: f64::INFINITY,
            home: None,
        }
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn home(&self) -> Option<VertexId> {
        self.home
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }

    fn set_cost_home(&mut self, cost: f64, home: VertexId) {
        self.cost = cost;
        self.home = Some(home);
    }
}

/// 路径结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// 路径上的顶点序列
    pub vertices: Vec<VertexId>,
    /// 路径上的边序列
    pub edges: Vec<EdgeId>,
    /// 路径长度（边数）
    pub length: usize,
    /// 路径总权重
    pub total_weight: f64,
}

/// Dijkstra 的结果表：图中每个顶点一项，顺序与图的顶点顺序一致
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: VertexId,
    table: IndexMap<VertexId, CostHomePair>,
}

impl ShortestPaths {
    /// 计算时使用的源点
    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn get(&self, vertex: VertexId) -> Option<&CostHomePair> {
        self.table.get(&vertex)
    }

    /// 到源点的代价；不在表中或不可达时为正无穷
    pub fn cost(&self, vertex: VertexId) -> f64 {
        self.table.get(&vertex).map_or(f64::INFINITY, CostHomePair::cost)
    }

    pub fn home(&self, vertex: VertexId) -> Option<VertexId> {
        self.table.get(&vertex).and_then(CostHomePair::home)
    }

    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.cost(vertex).is_finite()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &CostHomePair)> + '_ {
        self.table.iter().map(|(&v, pair)| (v, pair))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 每个顶点到源点的距离
    pub fn distances(&self) -> IndexMap<VertexId, f64> {
        self.table.iter().map(|(&v, pair)| (v, pair.cost)).collect()
    }

    /// 从 `start` 沿前驱链走回 `end`，返回 `start → end` 的顶点序列
    ///
    /// 前驱链指向源点，所以 `end` 应当是计算本表时的源点：
    /// 从终点跑一次 Dijkstra，即可为任意起点重建到该终点的路径。
    ///
    /// `start == end` 时总是返回 `[start]`，即使它从源点不可达。
    /// `start` 不可达时返回 [`Error::Unreachable`]；
    /// 前驱链在到达 `end` 之前中断或成环时返回 [`Error::BrokenPath`]。
    pub fn path(&self, start: VertexId, end: VertexId) -> Result<Vec<VertexId>> {
        let entry = self
            .table
            .get(&start)
            .ok_or_else(|| Error::VertexNotFound(start.to_string()))?;
        if start == end {
            return Ok(vec![start]);
        }
        if !entry.is_reachable() {
            return Err(Error::Unreachable(format!("{} -> {}", start, end)));
        }

        let mut path = Vec::new();
        let mut current = start;
        while current != end {
            if path.len() >= self.table.len() {
                return Err(Error::BrokenPath(format!("{} 的前驱链成环", start)));
            }
            path.push(current);
            current = self.home(current).ok_or_else(|| {
                Error::BrokenPath(format!("{} 没有前驱，无法到达 {}", current, end))
            })?;
        }
        path.push(end);

        Ok(path)
    }
}

/// Dijkstra 最短路径
pub struct Dijkstra<'g, V, E> {
    graph: &'g Graph<V, E>,
}

impl<'g, V, E: EdgeWeight> Dijkstra<'g, V, E> {
    /// 创建算法实例
    pub fn new(graph: &'g Graph<V, E>) -> Self {
        Self { graph }
    }

    /// 计算 `source` 到所有顶点的最短距离与前驱
    pub fn run(&self, source: VertexId) -> ShortestPaths {
        let mut unvisited: IndexSet<VertexId> = self.graph.vertex_ids().collect();
        let mut table: IndexMap<VertexId, CostHomePair> = unvisited
            .iter()
            .map(|&v| (v, CostHomePair::unreached()))
            .collect();
        if let Some(entry) = table.get_mut(&source) {
            entry.cost = 0.0;
        }

        let mut rounds = 0usize;
        while let Some(current) = closest(&table, &unvisited) {
            unvisited.shift_remove(&current);
            rounds += 1;

            let base = table.get(&current).map_or(f64::INFINITY, CostHomePair::cost);
            for (neighbor, edge_id) in self.graph.incident_edges(current) {
                if !unvisited.contains(&neighbor) {
                    continue;
                }
                let weight = self.graph.edge(edge_id).map_or(0.0, Edge::weight);
                let alt = base + weight;
                if let Some(entry) = table.get_mut(&neighbor) {
                    if alt < entry.cost {
                        entry.set_cost_home(alt, current);
                    }
                }
            }
        }

        trace!(source = %source, rounds, "dijkstra done");
        ShortestPaths { source, table }
    }

    /// 所有顶点到 `source` 的距离
    pub fn distances(&self, source: VertexId) -> IndexMap<VertexId, f64> {
        self.run(source).distances()
    }

    /// `start` 到 `end` 的最短路径
    ///
    /// 以 `end` 为源点运行一次，再从 `start` 沿前驱链重建。不可达时返回 `None`。
    pub fn shortest_path(&self, start: VertexId, end: VertexId) -> Option<PathResult> {
        let paths = self.run(end);
        if !paths.is_reachable(start) {
            return None;
        }

        let vertices = paths.path(start, end).ok()?;
        let edges = vertices
            .windows(2)
            .map(|pair| self.graph.edge_ref(pair[0], pair[1]))
            .collect::<Option<Vec<_>>>()?;

        Some(PathResult {
            length: edges.len(),
            total_weight: paths.cost(start),
            vertices,
            edges,
        })
    }
}

/// 选出未访问集合中代价最小的顶点；并列时取最后一个
fn closest(
    table: &IndexMap<VertexId, CostHomePair>,
    unvisited: &IndexSet<VertexId>,
) -> Option<VertexId> {
    let mut closest = None;
    let mut min_cost = f64::INFINITY;
    for &v in unvisited {
        let cost = table.get(&v).map_or(f64::INFINITY, CostHomePair::cost);
        if cost <= min_cost {
            min_cost = cost;
            closest = Some(v);
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// A -1- B -2- C -1- D，另有 A -5- C
    fn create_test_graph() -> (Graph<&'static str, f64>, [VertexId; 4]) {
        let mut graph = Graph::new();
        let a = graph.add_vertex("A").unwrap();
        let b = graph.add_vertex("B").unwrap();
        let c = graph.add_vertex("C").unwrap();
        let d = graph.add_vertex("D").unwrap();
        graph.add_edge(1.0, a, b).unwrap();
        graph.add_edge(2.0, b, c).unwrap();
        graph.add_edge(5.0, a, c).unwrap();
        graph.add_edge(1.0, c, d).unwrap();
        (graph, [a, b, c, d])
    }

    #[test]
    fn test_costs_and_homes() {
        let (graph, [a, b, c, d]) = create_test_graph();
        let paths = Dijkstra::new(&graph).run(a);

        assert_eq!(paths.source(), a);
        assert_eq!(paths.cost(a), 0.0);
        assert_eq!(paths.cost(b), 1.0);
        assert_eq!(paths.cost(c), 3.0);
        assert_eq!(paths.cost(d), 4.0);

        assert_eq!(paths.home(a), None);
        assert_eq!(paths.home(b), Some(a));
        assert_eq!(paths.home(c), Some(b));
        assert_eq!(paths.home(d), Some(c));
    }

    #[test]
    fn test_path_reconstruction_from_end_rooted_table() {
        let (graph, [a, b, c, d]) = create_test_graph();
        let paths = Dijkstra::new(&graph).run(d);

        assert_eq!(paths.path(a, d).unwrap(), vec![a, b, c, d]);
        assert_eq!(paths.path(b, d).unwrap(), vec![b, c, d]);
        assert_eq!(paths.path(d, d).unwrap(), vec![d]);
    }

    #[test]
    fn test_shortest_path() {
        let (graph, [a, b, c, d]) = create_test_graph();
        let result = Dijkstra::new(&graph).shortest_path(a, d).unwrap();

        assert_eq!(result.vertices, vec![a, b, c, d]);
        assert_eq!(result.length, 3);
        assert_eq!(result.total_weight, 4.0);
        assert_eq!(result.edges[0], graph.edge_ref(a, b).unwrap());
        assert_eq!(result.edges[2], graph.edge_ref(d, c).unwrap());
    }

    #[test]
    fn test_disconnected() {
        let (mut graph, [a, ..]) = create_test_graph();
        let x = graph.add_vertex("X").unwrap();
        let dijkstra = Dijkstra::new(&graph);
        let paths = dijkstra.run(a);

        assert_eq!(paths.cost(x), f64::INFINITY);
        assert_eq!(paths.home(x), None);
        assert!(!paths.is_reachable(x));
        assert!(matches!(paths.path(x, a), Err(Error::Unreachable(_))));
        assert!(dijkstra.shortest_path(x, a).is_none());
        assert_eq!(paths.len(), graph.vertex_count());

        // 起点即终点时不看可达性
        assert_eq!(paths.path(x, x).unwrap(), vec![x]);
        assert_eq!(paths.path(a, a).unwrap(), vec![a]);
    }

    #[test]
    fn test_path_toward_non_source_fails_cleanly() {
        let (graph, [a, b, c, d]) = create_test_graph();
        let paths = Dijkstra::new(&graph).run(a);

        // 前驱链通往 A，从 C 出发走不到 D
        assert_eq!(paths.path(c, a).unwrap(), vec![c, b, a]);
        assert!(matches!(paths.path(c, d), Err(Error::BrokenPath(_))));
        assert!(matches!(
            paths.path(VertexId::new(99), a),
            Err(Error::VertexNotFound(_))
        ));
    }

    #[test]
    fn test_non_numeric_weights_are_zero() {
        let mut graph: Graph<&str, &str> = Graph::new();
        let a = graph.add_vertex("A").unwrap();
        let b = graph.add_vertex("B").unwrap();
        let c = graph.add_vertex("C").unwrap();
        graph.add_edge("road", a, b).unwrap();
        graph.add_edge("rail", b, c).unwrap();

        let paths = Dijkstra::new(&graph).run(a);
        assert_eq!(paths.cost(c), 0.0);
        assert!(paths.is_reachable(c));
    }

    #[test]
    fn test_tie_break_takes_last_candidate() {
        // S 到 A、B 代价相同，B 在后面，先被选中并先松弛 C
        let mut graph: Graph<&str, u32> = Graph::new();
        let s = graph.add_vertex("S").unwrap();
        let a = graph.add_vertex("A").unwrap();
        let b = graph.add_vertex("B").unwrap();
        let c = graph.add_vertex("C").unwrap();
        graph.add_edge(1, s, a).unwrap();
        graph.add_edge(1, s, b).unwrap();
        graph.add_edge(1, a, c).unwrap();
        graph.add_edge(1, b, c).unwrap();

        let paths = Dijkstra::new(&graph).run(s);
        assert_eq!(paths.cost(c), 2.0);
        assert_eq!(paths.home(c), Some(b));
    }

    #[test]
    fn test_distances() {
        let (graph, [a, b, c, d]) = create_test_graph();
        let distances = Dijkstra::new(&graph).distances(c);
        let ordered: Vec<_> = distances.into_iter().collect();
        assert_eq!(ordered, vec![(a, 3.0), (b, 2.0), (c, 0.0), (d, 1.0)]);
    }

    /// 枚举所有简单路径求最短距离
    fn brute_force(graph: &Graph<u32, u32>, from: VertexId, to: VertexId) -> f64 {
        fn walk(
            graph: &Graph<u32, u32>,
            current: VertexId,
            to: VertexId,
            cost: f64,
            visited: &mut Vec<VertexId>,
            best: &mut f64,
        ) {
            if current == to {
                *best = best.min(cost);
                return;
            }
            for (next, edge) in graph.incident_edges(current) {
                if visited.contains(&next) {
                    continue;
                }
                let weight = graph.edge(edge).map_or(0.0, Edge::weight);
                visited.push(next);
                walk(graph, next, to, cost + weight, visited, best);
                visited.pop();
            }
        }

        let mut best = f64::INFINITY;
        walk(graph, from, to, 0.0, &mut vec![from], &mut best);
        best
    }

    #[test]
    fn test_matches_brute_force_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..40 {
            let mut graph: Graph<u32, u32> = Graph::new();
            let n = rng.gen_range(2..8);
            let ids: Vec<_> = (0..n).map(|i| graph.add_vertex(i).unwrap()).collect();
            for i in 0..n as usize {
                for j in (i + 1)..n as usize {
                    if rng.gen_bool(0.4) {
                        graph.add_edge(rng.gen_range(1..10), ids[i], ids[j]);
                    }
                }
            }

            let source = ids[0];
            let paths = Dijkstra::new(&graph).run(source);
            assert_eq!(paths.cost(source), 0.0);

            for &v in &ids {
                let expected = brute_force(&graph, source, v);
                assert_eq!(paths.cost(v), expected);

                if expected.is_finite() {
                    // 前驱链上的边权之和等于代价
                    let chain = paths.path(v, source).unwrap();
                    let sum: f64 = chain
                        .windows(2)
                        .map(|p| {
                            let edge = graph.edge_ref(p[0], p[1]).unwrap();
                            graph.edge(edge).unwrap().weight()
                        })
                        .sum();
                    assert_eq!(sum, expected);
                } else {
                    assert_eq!(paths.home(v), None);
                }
            }
        }
    }
}
