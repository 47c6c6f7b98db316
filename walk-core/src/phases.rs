//! Per-tick phases of the walk animation.
//!
//! Each animation tick runs:
//! 1. [`extend_phase`]: grow the walk by one edge from a random frontier node.
//! 2. [`leaf_phase`]: color every node that has just become a terminal leaf.
//!
//! When [`extend_phase`] finds no frontier the walk is exhausted and a final
//! [`leaf_phase`] settles the remaining leaves before the cycle restarts.

use glam::DVec2;
use rand::{Rng, seq::IndexedRandom};
use tracing::trace;

use crate::{
    graph::Graph,
    types::{NodeKey, Rgb},
    walk::{Edge, Walk},
};

/// A dot to draw on a freshly detected leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafDot {
    pub key: NodeKey,
    pub pos: DVec2,
    pub color: Rgb,
    pub diameter: f64,
}

/// Extends the walk by a single edge.
///
/// 1. Collects the frontier (visited nodes with an unvisited neighbour)
///    and picks one uniformly.
/// 2. Picks one of its unvisited neighbours uniformly.
/// 3. Records the edge via [`Walk::add_edge`], which bumps both degrees and
///    marks the new node visited.
///
/// ### Returns
/// The new edge, or `None` if the walk is exhausted.
pub fn extend_phase(graph: &Graph, walk: &mut Walk, rng: &mut impl Rng) -> Option<Edge> {
    let frontier = walk.frontier(graph);
    let &from = frontier.choose(rng)?;

    let candidates = walk.unvisited_neighbors(graph, from);
    let &to = candidates.choose(rng)?;

    let edge = walk.add_edge(graph, from, to)?;
    trace!(from = %edge.from, to = %edge.to, visited = walk.visited_count(), "walk extended");
    Some(edge)
}

/// Marks every visited node that has become a terminal leaf.
///
/// A node qualifies when it has exactly one walk edge and no unvisited
/// neighbour left (see [`Walk::is_terminal`]). Nodes already marked are
/// skipped, so each leaf yields exactly one [`LeafDot`] over the life of the
/// walk. Colors are drawn uniformly from `palette`.
///
/// ### Returns
/// The dots for leaves marked during this call, in key order.
pub fn leaf_phase(
    graph: &Graph,
    walk: &mut Walk,
    palette: &[Rgb],
    diameter: f64,
    rng: &mut impl Rng,
) -> Vec<LeafDot> {
    let found: Vec<NodeKey> = walk
        .visited()
        .filter(|&k| !walk.is_leaf(k) && walk.is_terminal(graph, k))
        .collect();

    let mut dots = Vec::with_capacity(found.len());
    for key in found {
        if !walk.mark_leaf(key) {
            continue;
        }
        let Some(pos) = graph.position(key) else {
            continue;
        };
        let Some(&color) = palette.choose(rng) else {
            continue;
        };
        dots.push(LeafDot {
            key,
            pos,
            color,
            diameter,
        });
    }
    dots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, grid::GridKind};
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    const PALETTE: [Rgb; 3] = [Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)];

    fn path_graph(n: usize) -> Graph {
        let mut g = Graph::new();
        let keys: Vec<_> = (0..n)
            .map(|i| g.add_node(DVec2::new(i as f64 * 10.0, 0.0)))
            .collect();
        for pair in keys.windows(2) {
            g.link(pair[0], pair[1]);
        }
        g.set_start(keys[0]);
        g
    }

    #[test]
    fn extend_phase_adds_one_node_per_step() {
        let g = path_graph(5);
        let mut walk = Walk::new(g.start().unwrap());
        let mut rng = StdRng::seed_from_u64(1);

        for expected in 2..=5 {
            let edge = extend_phase(&g, &mut walk, &mut rng).unwrap();
            assert_eq!(walk.visited_count(), expected);
            assert!(g.are_linked(edge.from, edge.to));
        }
        assert!(extend_phase(&g, &mut walk, &mut rng).is_none());
        assert_eq!(walk.edges().len(), 4);
    }

    #[test]
    fn extend_phase_on_single_node_is_exhausted() {
        let mut g = Graph::new();
        let only = g.add_node(DVec2::ZERO);
        g.set_start(only);
        let mut walk = Walk::new(only);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(extend_phase(&g, &mut walk, &mut rng).is_none());
        assert_eq!(walk.visited_count(), 1);
    }

    #[test]
    fn leaf_phase_marks_path_ends_once() {
        let g = path_graph(4);
        let start = g.start().unwrap();
        let mut walk = Walk::new(start);
        let mut rng = StdRng::seed_from_u64(9);

        // The start of a path is a leaf as soon as its only neighbour is reached.
        extend_phase(&g, &mut walk, &mut rng).unwrap();
        let dots = leaf_phase(&g, &mut walk, &PALETTE, 5.0, &mut rng);
        assert_eq!(dots.len(), 1);
        assert_eq!(dots[0].key, start);
        assert_eq!(dots[0].diameter, 5.0);
        assert!(PALETTE.contains(&dots[0].color));

        while extend_phase(&g, &mut walk, &mut rng).is_some() {}
        let dots = leaf_phase(&g, &mut walk, &PALETTE, 5.0, &mut rng);
        assert_eq!(dots.len(), 1);
        assert_ne!(dots[0].key, start);

        // Nothing left to color.
        assert!(leaf_phase(&g, &mut walk, &PALETTE, 5.0, &mut rng).is_empty());
        assert_eq!(walk.leaf_count(), 2);
    }

    #[test]
    fn leaf_phase_with_empty_palette_marks_without_dots() {
        let g = path_graph(2);
        let mut walk = Walk::new(g.start().unwrap());
        let mut rng = StdRng::seed_from_u64(0);
        extend_phase(&g, &mut walk, &mut rng).unwrap();

        let dots = leaf_phase(&g, &mut walk, &[], 5.0, &mut rng);
        assert!(dots.is_empty());
        assert_eq!(walk.leaf_count(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn walk_spans_every_grid(seed in any::<u64>(), kind in 0usize..4) {
            let kind = GridKind::ALL[kind];
            let cfg = Config::default();
            let g = kind.build(&cfg).unwrap();
            let mut walk = Walk::new(g.start().unwrap());
            let mut rng = StdRng::seed_from_u64(seed);
            let mut marked = std::collections::BTreeSet::new();

            loop {
                let before = walk.visited_count();
                let step = extend_phase(&g, &mut walk, &mut rng);
                for dot in leaf_phase(&g, &mut walk, &cfg.palette, kind.leaf_dot_size(), &mut rng) {
                    prop_assert!(marked.insert(dot.key), "leaf {} colored twice", dot.key);
                }
                match step {
                    Some(_) => prop_assert_eq!(walk.visited_count(), before + 1),
                    None => break,
                }
            }

            prop_assert!(walk.is_complete(&g));
            prop_assert_eq!(walk.edges().len(), g.len() - 1);
            let degree_sum: u32 = g.keys().map(|k| walk.degree(k)).sum();
            prop_assert_eq!(degree_sum as usize, 2 * (g.len() - 1));

            // Every degree-1 node of the finished tree is colored.
            let ones = g.keys().filter(|&k| walk.degree(k) == 1).count();
            prop_assert_eq!(marked.len(), ones);
        }
    }
}
