//! Drawing surface the animation renders through.
//!
//! The core never draws directly; it issues canvas-style primitives on a
//! [`Surface`] and leaves rasterisation to whoever implements it (the egui
//! viewer keeps a retained canvas, tests use [`Recording`]).

use glam::DVec2;

use crate::types::Rgb;

pub trait Surface {
    /// Clears the whole canvas to `color`.
    fn background(&mut self, color: Rgb);
    /// Sets the color and weight used by subsequent lines.
    fn stroke(&mut self, color: Rgb, weight: f32);
    /// Sets the color used by subsequent ellipses.
    fn fill(&mut self, color: Rgb);
    fn line(&mut self, a: DVec2, b: DVec2);
    /// Draws a filled circle of the given diameter.
    fn ellipse(&mut self, center: DVec2, diameter: f64);
}

/// One recorded drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Background(Rgb),
    Stroke(Rgb, f32),
    Fill(Rgb),
    Line(DVec2, DVec2),
    Ellipse(DVec2, f64),
}

/// A [`Surface`] that only remembers what was asked of it.
#[derive(Debug, Default)]
pub struct Recording {
    pub commands: Vec<Command>,
}

impl Recording {
    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Line(..)))
            .count()
    }

    pub fn ellipses(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Ellipse(..)))
            .count()
    }

    pub fn backgrounds(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Background(..)))
            .count()
    }
}

impl Surface for Recording {
    fn background(&mut self, color: Rgb) {
        self.commands.push(Command::Background(color));
    }

    fn stroke(&mut self, color: Rgb, weight: f32) {
        self.commands.push(Command::Stroke(color, weight));
    }

    fn fill(&mut self, color: Rgb) {
        self.commands.push(Command::Fill(color));
    }

    fn line(&mut self, a: DVec2, b: DVec2) {
        self.commands.push(Command::Line(a, b));
    }

    fn ellipse(&mut self, center: DVec2, diameter: f64) {
        self.commands.push(Command::Ellipse(center, diameter));
    }
}
