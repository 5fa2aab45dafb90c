//! Undirected simple graph with breadth-first hop distances.
//!
//! Nodes are labeled `0..node_count`. The graph stores topology only: edge
//! weights in this experiment are a fixed function of the topology and the
//! mass factor, so the field solver materializes them directly into the
//! Laplacian instead of keeping them here.

use std::collections::VecDeque;

/// Undirected simple graph on nodes `0..node_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    node_count: usize,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Create a graph with `node_count` nodes and no edges.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            adjacency: vec![Vec::new(); node_count],
            edges: Vec::new(),
        }
    }

    /// Create a graph from an explicit edge list.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::new(node_count);
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Add the undirected edge `(u, v)`.
    ///
    /// Callers keep the graph simple: endpoints in range, no self-loops,
    /// each unordered pair added at most once. The sampler visits every
    /// pair exactly once, so it satisfies this by construction.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u != v, "self-loop on node {u}");
        debug_assert!(u < self.node_count && v < self.node_count);
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        self.edges.push((u, v));
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges as unordered pairs, in insertion order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Neighbors of `node`, in insertion order.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Unweighted degree of `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Whether the undirected edge `(u, v)` is present.
    pub fn contains_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency.get(u).is_some_and(|adj| adj.contains(&v))
    }

    /// Shortest-path hop count from `source` to every node.
    ///
    /// Plain breadth-first search on the unweighted topology. Unreachable
    /// nodes (and every node, if `source` is out of range) get `None`.
    pub fn hop_distances(&self, source: usize) -> Vec<Option<usize>> {
        let mut distances = vec![None; self.node_count];
        if source >= self.node_count {
            return distances;
        }
        distances[source] = Some(0);
        let mut queue = VecDeque::from([source]);
        while let Some(u) = queue.pop_front() {
            if let Some(d) = distances[u] {
                for &v in &self.adjacency[u] {
                    if distances[v].is_none() {
                        distances[v] = Some(d + 1);
                        queue.push_back(v);
                    }
                }
            }
        }
        distances
    }

    /// Whether every node is reachable from node 0.
    pub fn is_connected(&self) -> bool {
        self.hop_distances(0).iter().all(|d| d.is_some())
    }
}
