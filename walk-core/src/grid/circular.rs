use std::f64::consts::TAU;

use glam::DVec2;

use crate::{config::Config, graph::Graph, types::NodeKey};

/// Number of points on ring `i`: one for the center, otherwise
/// `max(6, floor(2π·i))`.
pub fn ring_point_count(i: usize) -> usize {
    if i == 0 {
        1
    } else {
        ((TAU * i as f64).floor() as usize).max(6)
    }
}

/// Builds concentric rings of points around the canvas center.
///
/// Rings are `cfg.ring_gap` apart and stop one gap short of the nearest
/// canvas edge. Every ring is linked as a cycle, ring 1 links to the center
/// and each node of ring `i >= 2` links to its nearest point on ring `i - 1`.
/// The walk starts at the center.
pub fn build(cfg: &Config) -> Graph {
    let center = cfg.center();
    let gap = cfg.ring_gap;
    let max_radius = cfg.canvas_size.min_element() * 0.5 - gap;

    let mut graph = Graph::new();
    let center_key = graph.add_node(center);
    let mut rings: Vec<Vec<NodeKey>> = vec![vec![center_key]];

    let mut i = 1;
    while i as f64 * gap <= max_radius {
        let radius = i as f64 * gap;
        let n = ring_point_count(i);
        let ring: Vec<NodeKey> = (0..n)
            .map(|j| {
                let angle = TAU * j as f64 / n as f64;
                graph.add_node(center + DVec2::new(angle.cos(), angle.sin()) * radius)
            })
            .collect();

        for j in 0..n {
            graph.link(ring[j], ring[(j + 1) % n]);
        }

        if let Some(inner) = rings.last() {
            for &key in &ring {
                if let Some(nearest) = nearest_on_ring(&graph, inner, key) {
                    graph.link(key, nearest);
                }
            }
        }

        rings.push(ring);
        i += 1;
    }

    graph.set_start(center_key);
    graph
}

fn nearest_on_ring(graph: &Graph, ring: &[NodeKey], key: NodeKey) -> Option<NodeKey> {
    let pos = graph.position(key)?;
    ring.iter()
        .filter_map(|&k| graph.position(k).map(|p| (k, (p - pos).length_squared())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(k, _)| k)
}
