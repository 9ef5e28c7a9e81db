//! Weighted edit graph over a distance matrix, and shortest-path search.
//!
//! The graph is a fixed grid: every node `(r, c)` has at most three outgoing
//! edges, all pointing towards `(0, 0)`, so it is acyclic and a plain
//! adjacency list is enough.

use ndarray::Array2;

use crate::phonetic::distance_matrix;
use crate::types::CostWeights;

/// Matrix coordinate `(row, col)`.
pub type Node = (usize, usize);

/// Sequence of coordinates from the bottom-right corner to `(0, 0)`.
pub type Path = Vec<Node>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Keep,
    Delete,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub kind: EdgeKind,
    pub to: Node,
    pub weight: u32,
}

/// Directed edit graph built from a distance matrix.
#[derive(Debug, Clone)]
pub struct EditGraph {
    height: usize,
    width: usize,
    adjacency: Vec<Vec<Edge>>,
}

impl EditGraph {
    /// Build the graph for turning `source` into `target`.
    pub fn build<T: PartialEq>(source: &[T], target: &[T], weights: CostWeights) -> Self {
        let mtx = distance_matrix(source, target);
        Self::from_matrix(&mtx, source, target, weights)
    }

    /// Build the graph from an existing matrix of `source` against `target`.
    ///
    /// Vertical edges delete a source symbol, horizontal edges insert a target
    /// symbol, and a free diagonal edge keeps a symbol both sides share.
    pub fn from_matrix<T: PartialEq>(
        mtx: &Array2<u32>,
        source: &[T],
        target: &[T],
        weights: CostWeights,
    ) -> Self {
        let (height, width) = mtx.dim();
        debug_assert_eq!(height, source.len() + 1);
        debug_assert_eq!(width, target.len() + 1);

        let mut adjacency = Vec::with_capacity(height * width);
        for r in 0..height {
            for c in 0..width {
                let mut edges = Vec::with_capacity(3);
                if r > 0
                    && c > 0
                    && mtx[[r, c]] == mtx[[r - 1, c - 1]]
                    && source[r - 1] == target[c - 1]
                {
                    edges.push(Edge {
                        kind: EdgeKind::Keep,
                        to: (r - 1, c - 1),
                        weight: 0,
                    });
                }
                if r > 0 {
                    edges.push(Edge {
                        kind: EdgeKind::Delete,
                        to: (r - 1, c),
                        weight: weights.deletion,
                    });
                }
                if c > 0 {
                    edges.push(Edge {
                        kind: EdgeKind::Insert,
                        to: (r, c - 1),
                        weight: weights.insertion,
                    });
                }
                adjacency.push(edges);
            }
        }

        Self {
            height,
            width,
            adjacency,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Outgoing edges of `node`, in keep, delete, insert order.
    pub fn edges(&self, node: Node) -> &[Edge] {
        &self.adjacency[self.index(node)]
    }

    /// Bottom-right corner, where every path starts.
    pub fn source(&self) -> Node {
        (self.height - 1, self.width - 1)
    }

    fn index(&self, (r, c): Node) -> usize {
        r * self.width + c
    }

    /// Minimum weight from every node to `(0, 0)`, indexed row-major.
    fn distances_to_sink(&self) -> Vec<u64> {
        let mut dist = vec![0u64; self.adjacency.len()];
        for r in 0..self.height {
            for c in 0..self.width {
                if r == 0 && c == 0 {
                    continue;
                }
                let idx = self.index((r, c));
                let best = self.adjacency[idx]
                    .iter()
                    .map(|e| u64::from(e.weight) + dist[self.index(e.to)])
                    .min()
                    .unwrap_or(0);
                dist[idx] = best;
            }
        }
        dist
    }

    /// Total weight of a cheapest path.
    pub fn shortest_distance(&self) -> u64 {
        self.distances_to_sink()[self.index(self.source())]
    }

    /// Lazily enumerate all minimum-weight paths in discovery order.
    pub fn shortest_paths_iter(&self) -> ShortestPaths<'_> {
        ShortestPaths::new(self)
    }

    /// Up to `k` minimum-weight paths (`k == 0` is treated as 1).
    pub fn shortest_paths(&self, k: usize) -> Vec<Path> {
        self.shortest_paths_iter().take(k.max(1)).collect()
    }

    /// The first minimum-weight path.
    pub fn shortest_path(&self) -> Path {
        // The sink is reachable from every node, so a path always exists.
        self.shortest_paths_iter()
            .next()
            .unwrap_or_else(|| vec![(0, 0)])
    }
}

/// Depth-first enumeration of tight paths with an explicit stack.
///
/// An edge is tight when taking it keeps the remaining distance to the sink
/// minimal. Following only tight edges from the source yields exactly the
/// shortest paths, with no dead ends.
pub struct ShortestPaths<'g> {
    graph: &'g EditGraph,
    dist: Vec<u64>,
    stack: Vec<(Node, usize)>,
    trivial: bool,
}

impl<'g> ShortestPaths<'g> {
    fn new(graph: &'g EditGraph) -> Self {
        let source = graph.source();
        let trivial = source == (0, 0);
        Self {
            graph,
            dist: graph.distances_to_sink(),
            stack: if trivial { Vec::new() } else { vec![(source, 0)] },
            trivial,
        }
    }
}

impl Iterator for ShortestPaths<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        if self.trivial {
            self.trivial = false;
            return Some(vec![(0, 0)]);
        }

        let graph = self.graph;
        loop {
            let (node, cursor) = *self.stack.last()?;
            let edges = graph.edges(node);
            if cursor >= edges.len() {
                self.stack.pop();
                continue;
            }
            if let Some(top) = self.stack.last_mut() {
                top.1 += 1;
            }

            let edge = edges[cursor];
            let here = self.dist[graph.index(node)];
            let there = self.dist[graph.index(edge.to)];
            if here != u64::from(edge.weight) + there {
                continue;
            }

            if edge.to == (0, 0) {
                let mut path: Path = self.stack.iter().map(|&(n, _)| n).collect();
                path.push(edge.to);
                return Some(path);
            }
            self.stack.push((edge.to, 0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::{edit_distance_with2ops, segments};

    fn path_weight(graph: &EditGraph, path: &Path) -> u64 {
        path.windows(2)
            .map(|w| {
                graph
                    .edges(w[0])
                    .iter()
                    .find(|e| e.to == w[1])
                    .map(|e| u64::from(e.weight))
                    .expect("consecutive path nodes must be joined by an edge")
            })
            .sum()
    }

    #[test]
    fn test_graph_shape() {
        let graph = EditGraph::build(&["C", "V"], &["C", "V", "C"], CostWeights::default());
        assert_eq!(graph.height(), 3);
        assert_eq!(graph.width(), 4);
        assert_eq!(graph.node_count(), 12);
        // 3 row-0 inserts, 2 column-0 deletes, 6 interior delete/insert pairs, 3 keeps
        assert_eq!(graph.edge_count(), 20);
        assert!(graph.edges((0, 0)).is_empty());
        for r in 0..3 {
            for c in 0..4 {
                if (r, c) != (0, 0) {
                    assert!(!graph.edges((r, c)).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_keep_edges_require_matching_symbols() {
        // "ab" vs "ba": cell (2, 2) equals its diagonal but b != a
        let graph = EditGraph::build(&["a", "b"], &["b", "a"], CostWeights::default());
        assert!(graph
            .edges((2, 2))
            .iter()
            .all(|e| e.kind != EdgeKind::Keep));
        assert!(graph
            .edges((1, 2))
            .iter()
            .any(|e| e.kind == EdgeKind::Keep));
    }

    #[test]
    fn test_shortest_distance_matches_closed_form() {
        let w = CostWeights::default();
        for (a, b) in [("CCV", "CV"), ("ló", "hó"), ("CVCC", "CVCV"), ("", "CV")] {
            let (sa, sb) = (segments(a), segments(b));
            let graph = EditGraph::build(&sa, &sb, w);
            assert_eq!(graph.shortest_distance(), edit_distance_with2ops(&sa, &sb, w));
        }
    }

    #[test]
    fn test_all_paths_are_minimal_and_distinct() {
        let graph = EditGraph::build(&["C", "C", "V", "C"], &["C", "V"], CostWeights::default());
        let paths = graph.shortest_paths(50);
        assert!(paths.len() > 1);
        let best = graph.shortest_distance();
        for path in &paths {
            assert_eq!(path.first(), Some(&graph.source()));
            assert_eq!(path.last(), Some(&(0, 0)));
            assert_eq!(path_weight(&graph, path), best);
        }
        let mut unique = paths.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn test_trivial_graph() {
        let empty: [&str; 0] = [];
        let graph = EditGraph::build(&empty, &empty, CostWeights::default());
        assert_eq!(graph.shortest_paths(3), vec![vec![(0, 0)]]);
    }
}
