//! Core grid-walk animation library.
//!
//! Main components:
//! - [`grid`]: geometry builders for the square, triangular, hexagon-corner
//!   and circular grids.
//! - [`graph`]: node positions and symmetric adjacency.
//! - [`walk`]: visited set, degree counters and leaf marks of a walk.
//! - [`phases`]: per-tick walk extension and leaf coloring.
//! - [`cycle`]: the controller that restarts the walk on new grids.
//! - [`surface`]: the drawing surface the animation renders through.
//! - [`config`]: fixed constants for grids, colors and restart policy.
//! - [`error`]: configuration and grid errors.
//! - [`types`]: node keys and colors.

pub mod config;
pub mod cycle;
pub mod error;
pub mod graph;
pub mod grid;
pub mod phases;
pub mod surface;
pub mod types;
pub mod walk;
