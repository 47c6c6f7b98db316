use glam::DVec2;

use crate::{
    error::{Error, Result},
    grid::GridKind,
    types::Rgb,
};

/// How the [`crate::cycle::CycleController`] moves on after a walk is exhausted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RestartPolicy {
    /// Pause for `delay_secs` before the next cycle. The very first cycle
    /// always uses `first`; later cycles pick a grid kind uniformly.
    Delayed { delay_secs: f64, first: GridKind },
    /// Start the next cycle right away; every cycle, including the first,
    /// picks a grid kind uniformly.
    Immediate,
}

/// Fixed constants for grid construction, rendering and cycling.
#[derive(Clone, Debug)]
pub struct Config {
    /// Canvas width and height in pixels.
    pub canvas_size: DVec2,
    /// Spacing of the square grid.
    pub square_cell: f64,
    /// Distance between neighbouring nodes of the triangular lattice.
    pub triangle_spacing: f64,
    /// Circumradius of the hexagons whose corners form the hexagon grid.
    pub hex_radius: f64,
    /// Radial distance between consecutive rings of the circular grid.
    pub ring_gap: f64,

    pub restart: RestartPolicy,

    pub background: Rgb,
    pub edge_color: Rgb,
    pub edge_weight: f32,
    /// Leaf dot colors; one is drawn uniformly for every leaf.
    pub palette: [Rgb; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_size: DVec2::new(600.0, 600.0),
            square_cell: 20.0,
            triangle_spacing: 24.0,
            hex_radius: 20.0,
            ring_gap: 20.0,
            restart: RestartPolicy::Delayed {
                delay_secs: 2.0,
                first: GridKind::Square,
            },
            background: Rgb::new(18, 18, 24),
            edge_color: Rgb::new(220, 220, 210),
            edge_weight: 1.5,
            palette: [
                Rgb::new(238, 96, 85),
                Rgb::new(96, 211, 148),
                Rgb::new(255, 217, 125),
            ],
        }
    }
}

impl Config {
    /// Center of the canvas.
    pub fn center(&self) -> DVec2 {
        self.canvas_size * 0.5
    }

    /// Checks that every size is positive and finite and that the restart
    /// delay is usable.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("canvas_size.x", self.canvas_size.x),
            ("canvas_size.y", self.canvas_size.y),
            ("square_cell", self.square_cell),
            ("triangle_spacing", self.triangle_spacing),
            ("hex_radius", self.hex_radius),
            ("ring_gap", self.ring_gap),
        ];
        for (field, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig {
                    field,
                    reason: "must be a positive finite number",
                });
            }
        }

        if !self.edge_weight.is_finite() || self.edge_weight <= 0.0 {
            return Err(Error::InvalidConfig {
                field: "edge_weight",
                reason: "must be a positive finite number",
            });
        }

        if let RestartPolicy::Delayed { delay_secs, .. } = self.restart
            && (!delay_secs.is_finite() || delay_secs < 0.0)
        {
            return Err(Error::InvalidConfig {
                field: "restart.delay_secs",
                reason: "must be finite and not negative",
            });
        }

        Ok(())
    }
}
