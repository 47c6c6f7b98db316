use std::collections::{BTreeMap, BTreeSet};

use crate::{graph::Graph, types::NodeKey};

/// An edge added by the walk, from an already visited node to a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeKey,
    pub to: NodeKey,
}

/// Per-cycle state of the randomized spanning walk.
///
/// Tracks which nodes have been reached, how many walk edges touch each
/// node and which nodes have already been colored as leaves. Degrees only
/// grow and a node enters the leaf set at most once.
#[derive(Debug, Clone)]
pub struct Walk {
    visited: BTreeSet<NodeKey>,
    degree: BTreeMap<NodeKey, u32>,
    leaves: BTreeSet<NodeKey>,
    edges: Vec<Edge>,
}

impl Walk {
    /// Starts a walk with only `start` visited.
    pub fn new(start: NodeKey) -> Self {
        Self {
            visited: BTreeSet::from([start]),
            degree: BTreeMap::new(),
            leaves: BTreeSet::new(),
            edges: Vec::new(),
        }
    }

    pub fn is_visited(&self, key: NodeKey) -> bool {
        self.visited.contains(&key)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn visited(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.visited.iter().copied()
    }

    /// Number of walk edges touching `key`.
    pub fn degree(&self, key: NodeKey) -> u32 {
        self.degree.get(&key).copied().unwrap_or(0)
    }

    pub fn is_leaf(&self, key: NodeKey) -> bool {
        self.leaves.contains(&key)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Edges in the order the walk added them.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbours of `key` the walk has not reached yet.
    pub fn unvisited_neighbors(&self, graph: &Graph, key: NodeKey) -> Vec<NodeKey> {
        graph
            .neighbors(key)
            .filter(|n| !self.visited.contains(n))
            .collect()
    }

    fn has_unvisited_neighbor(&self, graph: &Graph, key: NodeKey) -> bool {
        graph.neighbors(key).any(|n| !self.visited.contains(&n))
    }

    /// Visited nodes with at least one unvisited neighbour.
    pub fn frontier(&self, graph: &Graph) -> Vec<NodeKey> {
        self.visited
            .iter()
            .copied()
            .filter(|&k| self.has_unvisited_neighbor(graph, k))
            .collect()
    }

    /// Returns `true` once no visited node can reach an unvisited one.
    pub fn is_exhausted(&self, graph: &Graph) -> bool {
        !self
            .visited
            .iter()
            .any(|&k| self.has_unvisited_neighbor(graph, k))
    }

    /// Returns `true` if every node of `graph` has been visited.
    pub fn is_complete(&self, graph: &Graph) -> bool {
        graph.keys().all(|k| self.visited.contains(&k))
    }

    /// Records the edge `from -> to` and marks `to` visited.
    ///
    /// The edge is rejected (returning `None`) unless `from` is visited,
    /// `to` is not, and the two are linked in `graph`.
    pub fn add_edge(&mut self, graph: &Graph, from: NodeKey, to: NodeKey) -> Option<Edge> {
        if !self.visited.contains(&from) || self.visited.contains(&to) {
            return None;
        }
        if !graph.are_linked(from, to) {
            return None;
        }

        *self.degree.entry(from).or_insert(0) += 1;
        *self.degree.entry(to).or_insert(0) += 1;
        self.visited.insert(to);

        let edge = Edge { from, to };
        self.edges.push(edge);
        Some(edge)
    }

    /// Returns `true` if `key` is visited, has exactly one walk edge and no
    /// unvisited neighbour left.
    pub fn is_terminal(&self, graph: &Graph, key: NodeKey) -> bool {
        self.visited.contains(&key)
            && self.degree(key) == 1
            && !self.has_unvisited_neighbor(graph, key)
    }

    /// Marks `key` as a colored leaf. Returns `false` if it already was one.
    pub fn mark_leaf(&mut self, key: NodeKey) -> bool {
        self.leaves.insert(key)
    }
}
