use glam::DVec2;

use crate::{config::Config, graph::Graph, types::NodeKey};

/// Builds an axis-aligned grid spaced by `cfg.square_cell`.
///
/// Grid lines lie on multiples of the cell size; the outermost ring (the
/// lines on the canvas border) is left out. Each node links to its four
/// axis neighbours and the walk starts at the node nearest the canvas
/// center.
pub fn build(cfg: &Config) -> Graph {
    let cell = cfg.square_cell;
    let cols = (cfg.canvas_size.x / cell).floor() as i64;
    let rows = (cfg.canvas_size.y / cell).floor() as i64;

    let mut graph = Graph::new();
    let mut keys: Vec<Vec<NodeKey>> = Vec::new();

    for i in 1..cols {
        let column = (1..rows)
            .map(|j| graph.add_node(DVec2::new(i as f64 * cell, j as f64 * cell)))
            .collect();
        keys.push(column);
    }

    for (i, column) in keys.iter().enumerate() {
        for (j, &key) in column.iter().enumerate() {
            if let Some(&below) = column.get(j + 1) {
                graph.link(key, below);
            }
            if let Some(&right) = keys.get(i + 1).and_then(|c| c.get(j)) {
                graph.link(key, right);
            }
        }
    }

    if let Some((start, _)) = graph.find_nearest_node(cfg.center()) {
        graph.set_start(start);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canvas_starts_at_center_cell() {
        let cfg = Config::default();
        let g = build(&cfg);

        assert_eq!(g.start(), Some(NodeKey::from_pos(DVec2::new(300.0, 300.0))));
        // 29 x 29 interior grid lines.
        assert_eq!(g.len(), 29 * 29);
        assert_eq!(g.edge_count(), 2 * 29 * 28);
    }

    #[test]
    fn outermost_ring_is_excluded() {
        let cfg = Config::default();
        let g = build(&cfg);

        for (_, p) in g.nodes() {
            assert!(p.x >= 20.0 && p.x <= 580.0);
            assert!(p.y >= 20.0 && p.y <= 580.0);
        }
        assert!(!g.contains(NodeKey::from_pos(DVec2::new(0.0, 300.0))));
        assert!(!g.contains(NodeKey::from_pos(DVec2::new(300.0, 600.0))));
    }

    #[test]
    fn adjacency_is_four_directional() {
        let cfg = Config::default();
        let g = build(&cfg);
        let center = NodeKey::from_pos(DVec2::new(300.0, 300.0));

        let neighbors: Vec<_> = g.neighbors(center).collect();
        assert_eq!(neighbors.len(), 4);
        for p in [(280.0, 300.0), (320.0, 300.0), (300.0, 280.0), (300.0, 320.0)] {
            assert!(g.are_linked(center, NodeKey::from_pos(DVec2::new(p.0, p.1))));
        }
        assert!(!g.are_linked(center, NodeKey::from_pos(DVec2::new(320.0, 320.0))));

        let corner = NodeKey::from_pos(DVec2::new(20.0, 20.0));
        assert_eq!(g.neighbors(corner).count(), 2);
        assert!(g.is_symmetric());
    }
}
