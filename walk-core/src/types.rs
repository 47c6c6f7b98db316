use std::fmt;

use glam::DVec2;

/// Canonical identifier for a grid point in a [`crate::graph::Graph`].
///
/// The key stores the point's coordinates in hundredths of a pixel, so two
/// positions that agree after rounding to 2 decimal places map to the same
/// key. This is what lets neighbouring hexagons share their corners.
///
/// A key is only meaningful within the lifetime of the graph it was built
/// for; graphs are rebuilt every cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey {
    pub x: i64,
    pub y: i64,
}

impl NodeKey {
    /// Builds the key for a position by rounding each coordinate to 2 decimals.
    pub fn from_pos(pos: DVec2) -> Self {
        Self {
            x: (pos.x * 100.0).round() as i64,
            y: (pos.y * 100.0).round() as i64,
        }
    }

    /// Position described by this key (the rounded coordinates).
    pub fn to_pos(self) -> DVec2 {
        DVec2::new(self.x as f64 / 100.0, self.y as f64 / 100.0)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.to_pos();
        write!(f, "{:.2},{:.2}", p.x, p.y)
    }
}

/// An RGB color as understood by a [`crate::surface::Surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
