use std::f64::consts::PI;

use glam::DVec2;

use crate::{config::Config, graph::Graph, types::NodeKey};

/// The six corners of a pointy-top hexagon with circumradius `radius`.
pub fn hexagon_corners(center: DVec2, radius: f64) -> [DVec2; 6] {
    std::array::from_fn(|i| {
        let angle = PI / 3.0 * i as f64 - PI / 6.0;
        center + DVec2::new(angle.cos(), angle.sin()) * radius
    })
}

/// Center of the hexagon at axial `(q, r)` on a pointy-top lattice.
pub fn hexagon_center(q: i64, r: i64, radius: f64, origin: DVec2) -> DVec2 {
    origin
        + DVec2::new(
            radius * 3f64.sqrt() * (q as f64 + r as f64 / 2.0),
            radius * 1.5 * r as f64,
        )
}

/// Adds one hexagon's corners to `graph` and links them in a cycle.
///
/// Corners shared with hexagons added earlier resolve to the same
/// [`NodeKey`], so neighbouring hexagons end up sharing nodes and edges.
pub fn add_hexagon(graph: &mut Graph, center: DVec2, radius: f64) -> [NodeKey; 6] {
    let keys = hexagon_corners(center, radius).map(|p| graph.add_node(p));
    for i in 0..keys.len() {
        graph.link(keys[i], keys[(i + 1) % keys.len()]);
    }
    keys
}

/// Builds the graph formed by the corners of hexagons tiling the canvas.
///
/// Only hexagons whose corners all lie at least half a radius inside the
/// canvas are kept. The walk starts at the corner nearest the canvas center.
pub fn build(cfg: &Config) -> Graph {
    let radius = cfg.hex_radius;
    let origin = cfg.center();
    let min = DVec2::splat(radius * 0.5);
    let max = cfg.canvas_size - min;

    let r_max = (cfg.canvas_size.y / (1.5 * radius)).ceil() as i64;
    let q_max = (cfg.canvas_size.x / (3f64.sqrt() * radius)).ceil() as i64 + r_max;

    let mut graph = Graph::new();
    for r in -r_max..=r_max {
        for q in -q_max..=q_max {
            let center = hexagon_center(q, r, radius, origin);
            let inside = hexagon_corners(center, radius)
                .iter()
                .all(|c| c.x >= min.x && c.x <= max.x && c.y >= min.y && c.y <= max.y);
            if inside {
                add_hexagon(&mut graph, center, radius);
            }
        }
    }

    if let Some((start, _)) = graph.find_nearest_node(origin) {
        graph.set_start(start);
    }
    graph
}
