//! Retained drawing canvas backing the walk animation.
//!
//! egui repaints everything each frame, while the walk only ever adds to
//! the picture. [`Canvas`] implements [`Surface`] by remembering every
//! primitive in canvas coordinates and replaying them on each paint.

use glam::DVec2;
use walk_core::{surface::Surface, types::Rgb};

#[derive(Clone, Debug, PartialEq)]
enum Mark {
    Line([egui::Pos2; 2], egui::Stroke),
    Dot(egui::Pos2, f32, egui::Color32),
}

/// Canvas-space picture built up through the [`Surface`] calls.
#[derive(Debug)]
pub struct Canvas {
    size: egui::Vec2,
    background: egui::Color32,
    stroke: egui::Stroke,
    fill: egui::Color32,
    marks: Vec<Mark>,
}

fn color(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

fn pos(p: DVec2) -> egui::Pos2 {
    egui::pos2(p.x as f32, p.y as f32)
}

impl Canvas {
    pub fn new(size: DVec2) -> Self {
        Self {
            size: egui::vec2(size.x as f32, size.y as f32),
            background: egui::Color32::BLACK,
            stroke: egui::Stroke::new(1.0, egui::Color32::WHITE),
            fill: egui::Color32::WHITE,
            marks: Vec::new(),
        }
    }

    pub fn size(&self) -> egui::Vec2 {
        self.size
    }

    pub fn background_color(&self) -> egui::Color32 {
        self.background
    }

    pub fn line_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark::Line(..)))
            .count()
    }

    pub fn dot_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark::Dot(..)))
            .count()
    }

    /// Paints the canvas. `to_screen` maps canvas points to screen points and
    /// `scale` is the matching length factor.
    pub fn paint(
        &self,
        painter: &egui::Painter,
        to_screen: impl Fn(egui::Pos2) -> egui::Pos2,
        scale: f32,
    ) {
        let frame = egui::Rect::from_two_pos(
            to_screen(egui::Pos2::ZERO),
            to_screen(egui::Pos2::ZERO + self.size),
        );
        painter.rect_filled(frame, 0.0, self.background);

        for mark in &self.marks {
            match *mark {
                Mark::Line([a, b], stroke) => {
                    let stroke = egui::Stroke::new((stroke.width * scale).max(1.0), stroke.color);
                    painter.line_segment([to_screen(a), to_screen(b)], stroke);
                }
                Mark::Dot(center, radius, fill) => {
                    painter.circle_filled(to_screen(center), (radius * scale).max(1.0), fill);
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn background(&mut self, c: Rgb) {
        self.background = color(c);
        self.marks.clear();
    }

    fn stroke(&mut self, c: Rgb, weight: f32) {
        self.stroke = egui::Stroke::new(weight, color(c));
    }

    fn fill(&mut self, c: Rgb) {
        self.fill = color(c);
    }

    fn line(&mut self, a: DVec2, b: DVec2) {
        self.marks.push(Mark::Line([pos(a), pos(b)], self.stroke));
    }

    fn ellipse(&mut self, center: DVec2, diameter: f64) {
        self.marks
            .push(Mark::Dot(pos(center), diameter as f32 * 0.5, self.fill));
    }
}
