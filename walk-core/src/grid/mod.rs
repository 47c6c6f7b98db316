//! Geometry builders for the four grid topologies.
//!
//! Every builder lays out nodes inside the canvas described by
//! [`Config`], links them into a symmetric adjacency and picks the node the
//! walk starts from. [`GridKind::build`] dispatches to the right builder.

pub mod circular;
pub mod hexagon;
pub mod square;
pub mod triangular;

use std::fmt;

use rand::Rng;

use crate::{
    config::Config,
    error::{Error, Result},
    graph::Graph,
};

/// The grid topologies a cycle can walk over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridKind {
    Square,
    Triangular,
    HexCorners,
    Circular,
}

impl GridKind {
    pub const ALL: [GridKind; 4] = [
        GridKind::Square,
        GridKind::Triangular,
        GridKind::HexCorners,
        GridKind::Circular,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GridKind::Square => "square",
            GridKind::Triangular => "triangular",
            GridKind::HexCorners => "hexagon",
            GridKind::Circular => "circular",
        }
    }

    /// Picks one of the four kinds uniformly.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Diameter of the dot drawn on a leaf of this grid.
    pub fn leaf_dot_size(self) -> f64 {
        match self {
            GridKind::Square => 8.0,
            GridKind::Triangular => 7.0,
            GridKind::HexCorners => 6.0,
            GridKind::Circular => 6.0,
        }
    }

    /// Builds the graph for this kind.
    ///
    /// ### Errors
    /// Returns [`Error::EmptyGrid`] if no node fits inside the canvas.
    pub fn build(self, cfg: &Config) -> Result<Graph> {
        let graph = match self {
            GridKind::Square => square::build(cfg),
            GridKind::Triangular => triangular::build(cfg),
            GridKind::HexCorners => hexagon::build(cfg),
            GridKind::Circular => circular::build(cfg),
        };

        if graph.is_empty() || graph.start().is_none() {
            return Err(Error::EmptyGrid { kind: self });
        }
        Ok(graph)
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
