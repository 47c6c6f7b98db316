use std::collections::BTreeMap;

use glam::DVec2;

use crate::{config::Config, graph::Graph, types::NodeKey};

/// The six axial unit steps of a triangular lattice.
pub const AXIAL_STEPS: [(i64, i64); 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

/// Converts axial lattice coordinates to a canvas position around `origin`.
pub fn axial_to_pos(q: i64, r: i64, spacing: f64, origin: DVec2) -> DVec2 {
    let h = 3f64.sqrt() / 2.0;
    origin
        + DVec2::new(
            spacing * (q as f64 + r as f64 / 2.0),
            spacing * r as f64 * h,
        )
}

/// Builds a triangular lattice centered on the canvas.
///
/// Nodes keep one spacing of margin from every canvas edge. Each node links
/// to the lattice points one axial step away and the walk starts at the
/// origin `(0, 0)`, which sits on the canvas center.
pub fn build(cfg: &Config) -> Graph {
    let s = cfg.triangle_spacing;
    let origin = cfg.center();
    let min = DVec2::splat(s);
    let max = cfg.canvas_size - DVec2::splat(s);

    let row_h = s * 3f64.sqrt() / 2.0;
    let r_max = (cfg.canvas_size.y / row_h).ceil() as i64;
    let q_max = (cfg.canvas_size.x / s).ceil() as i64 + r_max;

    let mut graph = Graph::new();
    let mut lattice: BTreeMap<(i64, i64), NodeKey> = BTreeMap::new();

    for r in -r_max..=r_max {
        for q in -q_max..=q_max {
            let p = axial_to_pos(q, r, s, origin);
            if p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y {
                lattice.insert((q, r), graph.add_node(p));
            }
        }
    }

    for (&(q, r), &key) in &lattice {
        for (dq, dr) in AXIAL_STEPS {
            if let Some(&other) = lattice.get(&(q + dq, r + dr)) {
                graph.link(key, other);
            }
        }
    }

    if let Some(&start) = lattice.get(&(0, 0)) {
        graph.set_start(start);
    }
    graph
}
