use std::collections::{BTreeMap, BTreeSet};

use glam::DVec2;

use crate::types::NodeKey;

/// An undirected planar graph: node positions, adjacency and a start node.
///
/// Links are always stored in both directions, so adjacency is symmetric by
/// construction. Ordered maps keep iteration deterministic, which makes
/// walks reproducible under a seeded RNG.
#[derive(Debug, Clone)]
pub struct Graph {
    positions: BTreeMap<NodeKey, DVec2>,
    adjacency: BTreeMap<NodeKey, BTreeSet<NodeKey>>,
    start: Option<NodeKey>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            positions: BTreeMap::new(),
            adjacency: BTreeMap::new(),
            start: None,
        }
    }

    /// Inserts a node at `pos` and returns its key.
    ///
    /// Positions that round to the same key collapse into one node; the
    /// first inserted position is kept.
    pub fn add_node(&mut self, pos: DVec2) -> NodeKey {
        let key = NodeKey::from_pos(pos);
        self.positions.entry(key).or_insert(pos);
        self.adjacency.entry(key).or_default();
        key
    }

    /// Links two existing nodes in both directions. Self-links and links
    /// involving unknown keys are ignored.
    pub fn link(&mut self, a: NodeKey, b: NodeKey) {
        if a == b || !self.contains(a) || !self.contains(b) {
            return;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    pub fn set_start(&mut self, key: NodeKey) {
        if self.contains(key) {
            self.start = Some(key);
        }
    }

    /// Start node of the walk, if one has been chosen.
    pub fn start(&self) -> Option<NodeKey> {
        self.start
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.positions.contains_key(&key)
    }

    pub fn position(&self, key: NodeKey) -> Option<DVec2> {
        self.positions.get(&key).copied()
    }

    /// Neighbours of `key` in ascending key order. Unknown keys have none.
    pub fn neighbors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.adjacency.get(&key).into_iter().flatten().copied()
    }

    pub fn are_linked(&self, a: NodeKey, b: NodeKey) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.positions.keys().copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, DVec2)> + '_ {
        self.positions.iter().map(|(&k, &p)| (k, p))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Returns `true` if every link `a -> b` has a matching `b -> a`.
    pub fn is_symmetric(&self) -> bool {
        self.adjacency
            .iter()
            .all(|(&a, ns)| ns.iter().all(|&b| self.are_linked(b, a)))
    }

    /// Finds the node closest to `pos`, with the squared distance to it.
    pub fn find_nearest_node(&self, pos: DVec2) -> Option<(NodeKey, f64)> {
        let mut best = None;
        let mut best_d2 = f64::MAX;
        for (&key, &p) in &self.positions {
            let d2 = (p - pos).length_squared();
            if d2 < best_d2 {
                best_d2 = d2;
                best = Some(key);
            }
        }
        best.map(|key| (key, best_d2))
    }

    /// Keys reachable from the start node (including the start itself).
    pub fn reachable_from_start(&self) -> BTreeSet<NodeKey> {
        let mut seen = BTreeSet::new();
        let Some(start) = self.start else {
            return seen;
        };
        let mut stack = vec![start];
        seen.insert(start);
        while let Some(k) = stack.pop() {
            for n in self.neighbors(k) {
                if seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        seen
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_collapses_positions_with_same_key() {
        let mut g = Graph::new();
        let a = g.add_node(DVec2::new(1.001, 2.0));
        let b = g.add_node(DVec2::new(0.999, 2.0));
        assert_eq!(a, b);
        assert_eq!(g.len(), 1);
        // The first position wins.
        assert_eq!(g.position(a), Some(DVec2::new(1.001, 2.0)));
    }

    #[test]
    fn link_is_symmetric_and_ignores_bad_links() {
        let mut g = Graph::new();
        let a = g.add_node(DVec2::new(0.0, 0.0));
        let b = g.add_node(DVec2::new(10.0, 0.0));
        let ghost = NodeKey::from_pos(DVec2::new(99.0, 99.0));

        g.link(a, b);
        g.link(a, a);
        g.link(a, ghost);

        assert!(g.are_linked(a, b));
        assert!(g.are_linked(b, a));
        assert!(!g.are_linked(a, a));
        assert!(!g.contains(ghost));
        assert_eq!(g.edge_count(), 1);
        assert!(g.is_symmetric());
    }

    #[test]
    fn set_start_requires_existing_node() {
        let mut g = Graph::new();
        g.set_start(NodeKey::from_pos(DVec2::ZERO));
        assert_eq!(g.start(), None);

        let a = g.add_node(DVec2::ZERO);
        g.set_start(a);
        assert_eq!(g.start(), Some(a));
    }

    #[test]
    fn find_nearest_node_picks_closest() {
        let mut g = Graph::new();
        assert!(g.find_nearest_node(DVec2::ZERO).is_none());

        let a = g.add_node(DVec2::new(0.0, 0.0));
        let b = g.add_node(DVec2::new(10.0, 0.0));
        assert_eq!(g.find_nearest_node(DVec2::new(2.0, 0.0)), Some((a, 4.0)));
        assert_eq!(g.find_nearest_node(DVec2::new(7.0, 0.0)), Some((b, 9.0)));
    }

    #[test]
    fn reachable_from_start_follows_links() {
        let mut g = Graph::new();
        let a = g.add_node(DVec2::new(0.0, 0.0));
        let b = g.add_node(DVec2::new(1.0, 0.0));
        let c = g.add_node(DVec2::new(2.0, 0.0));
        let lone = g.add_node(DVec2::new(5.0, 5.0));
        g.link(a, b);
        g.link(b, c);
        g.set_start(a);

        let seen = g.reachable_from_start();
        assert_eq!(seen.len(), 3);
        assert!(!seen.contains(&lone));
    }
}
