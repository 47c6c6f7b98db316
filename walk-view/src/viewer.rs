//! Interactive grid-walk viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`CycleController`] and
//! the retained [`Canvas`] it draws on, and implements [`eframe::App`] to
//! animate and control the walk through an egui UI.

use eframe::App;
use glam::DVec2;
use rand::rngs::StdRng;
use tracing::error;
use walk_core::{
    config::Config,
    cycle::{CycleController, Phase, Tick},
    error::Result,
};

use crate::canvas::Canvas;

/// Main application state for the viewer.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions (run/pause, step, restart, pan and zoom).
/// 2. If `running` is `true` and `step_interval` has passed, call
///    [`Viewer::step_once`], which ticks the controller once.
/// 3. Paint the retained canvas.
///
/// ### Fields
/// - `controller` - Cycle controller driving grids and walks.
/// - `canvas` - Retained picture the controller draws into.
///
/// - `running` - Whether the animation is auto-advancing.
/// - `zoom` - Zoom factor for canvas-to-screen mapping.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `step_interval` - Minimum time between automatic ticks (seconds).
/// - `last_step_time` - egui time of the last tick.
/// - `last_error` - Last error reported by the controller, shown in the status bar.
pub struct Viewer {
    controller: CycleController<StdRng>,
    canvas: Canvas,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    step_interval: f64,
    last_step_time: f64,
    last_error: Option<String>,
}

impl Viewer {
    /// Creates a viewer and starts the first cycle.
    ///
    /// ### Errors
    /// Fails if `cfg` is invalid or the first grid cannot be built.
    pub fn new(cfg: Config, rng: StdRng) -> Result<Self> {
        let mut canvas = Canvas::new(cfg.canvas_size);
        let controller = CycleController::new(cfg, rng, &mut canvas)?;

        Ok(Self {
            controller,
            canvas,
            running: true,
            zoom: 1.0,
            pan: egui::vec2(0.0, 0.0),
            step_interval: 0.0,
            last_step_time: 0.0,
            last_error: None,
        })
    }

    /// Advances the animation by one controller tick at time `now`.
    ///
    /// Errors stop auto-running and are kept for the status bar.
    fn step_once(&mut self, now: f64) -> Option<Tick> {
        match self.controller.tick(now, &mut self.canvas) {
            Ok(tick) => Some(tick),
            Err(e) => {
                error!(error = %e, "tick failed");
                self.last_error = Some(e.to_string());
                self.running = false;
                None
            }
        }
    }

    /// Starts a new cycle on a random grid kind right away.
    fn restart(&mut self) {
        if let Err(e) = self.controller.restart(&mut self.canvas) {
            error!(error = %e, "restart failed");
            self.last_error = Some(e.to_string());
        } else {
            self.last_error = None;
        }
    }

    fn canvas_center(&self) -> egui::Vec2 {
        self.canvas.size() * 0.5
    }

    /// Converts a canvas-space position to screen-space.
    ///
    /// The canvas center is placed at the center of `rect`, then the
    /// offset is scaled by `zoom` and shifted by `pan`. Canvas y grows
    /// downwards like screen y.
    fn canvas_to_screen(&self, p: egui::Pos2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        let local = p.to_vec2() - self.canvas_center();
        center + local * self.zoom + self.pan
    }

    /// Converts a screen-space position back to canvas-space.
    ///
    /// This is the inverse of [`Viewer::canvas_to_screen`].
    fn screen_to_canvas(&self, p: egui::Pos2, rect: egui::Rect) -> egui::Pos2 {
        let local = (p - rect.center() - self.pan) / self.zoom;
        (local + self.canvas_center()).to_pos2()
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("dt target = ")
                        .range(0.0..=1.0)
                        .speed(0.01),
                );

                if ui.button("Step").clicked() {
                    let now = ctx.input(|i| i.time);
                    self.step_once(now);
                    self.last_step_time = now;
                }

                if ui.button("Restart").clicked() {
                    self.restart();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=10.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (grid kind, walk progress, cycle count).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        let cycle = self.controller.cycle();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(err) = &self.last_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err.as_str());
                    ui.separator();
                }
                ui.label(format!("cycle = {}", self.controller.cycles_started()));
                ui.label(match self.controller.phase() {
                    Phase::Walking => "walking".to_string(),
                    Phase::Waiting { .. } => "waiting".to_string(),
                });
                ui.separator();
                ui.label(format!("leaves = {}", cycle.walk.leaf_count()));
                ui.label(format!(
                    "visited = {}/{}",
                    cycle.walk.visited_count(),
                    cycle.graph.len()
                ));
                ui.label(format!("grid = {}", cycle.kind));
            });
        });
    }

    /// Builds the central panel where the canvas is painted and panned.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let canvas_before = self.screen_to_canvas(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.1, 10.0);

                let screen_after = self.canvas_to_screen(canvas_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            self.canvas
                .paint(&painter, |p| self.canvas_to_screen(p, rect), self.zoom);

            // Auto-run the animation if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                if now - self.last_step_time >= self.step_interval {
                    self.step_once(now);
                    self.last_step_time = now;
                }
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}

/// Initial window size: the canvas plus room for the two panels.
pub fn window_size(cfg: &Config) -> [f32; 2] {
    let size = cfg.canvas_size + DVec2::new(40.0, 100.0);
    [size.x as f32, size.y as f32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use walk_core::{config::RestartPolicy, grid::GridKind};

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    fn test_viewer() -> Viewer {
        let mut cfg = Config::default();
        cfg.canvas_size = DVec2::new(200.0, 200.0);
        Viewer::new(cfg, StdRng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn canvas_to_screen_and_back_is_roundtrip() {
        let mut viewer = test_viewer();
        viewer.zoom = 2.0;
        viewer.pan = egui::vec2(15.0, -7.0);
        let rect = test_rect();

        let points = [
            egui::pos2(0.0, 0.0),
            egui::pos2(100.0, 100.0),
            egui::pos2(37.5, 182.25),
        ];

        let eps = 1e-3;
        for p in points {
            let screen = viewer.canvas_to_screen(p, rect);
            let back = viewer.screen_to_canvas(screen, rect);
            assert!(
                (back.x - p.x).abs() < eps && (back.y - p.y).abs() < eps,
                "roundtrip mismatch: p={:?}, back={:?}",
                p,
                back
            );
        }
    }

    #[test]
    fn canvas_center_maps_to_rect_center() {
        let viewer = test_viewer();
        let rect = test_rect();
        assert_eq!(
            viewer.canvas_to_screen(egui::pos2(100.0, 100.0), rect),
            rect.center()
        );
    }

    #[test]
    fn new_viewer_starts_square_cycle_and_runs() {
        let viewer = test_viewer();
        assert_eq!(viewer.controller.cycle().kind, GridKind::Square);
        assert!(viewer.running);
        assert_eq!(viewer.canvas.line_count(), 0);
    }

    #[test]
    fn step_once_draws_an_edge() {
        let mut viewer = test_viewer();
        let tick = viewer.step_once(0.0).unwrap();

        assert!(matches!(tick, Tick::Stepped { .. }));
        assert_eq!(viewer.canvas.line_count(), 1);
        assert_eq!(viewer.controller.cycle().walk.visited_count(), 2);
    }

    #[test]
    fn restart_clears_canvas_and_walk() {
        let mut viewer = test_viewer();
        for _ in 0..10 {
            viewer.step_once(0.0);
        }
        assert_eq!(viewer.canvas.line_count(), 10);

        viewer.restart();

        assert_eq!(viewer.canvas.line_count(), 0);
        assert_eq!(viewer.canvas.dot_count(), 0);
        assert_eq!(viewer.controller.cycle().walk.visited_count(), 1);
        assert_eq!(viewer.controller.cycles_started(), 2);
        assert!(viewer.last_error.is_none());
    }

    #[test]
    fn immediate_policy_cycles_without_pause() {
        let mut cfg = Config::default();
        cfg.canvas_size = DVec2::new(120.0, 120.0);
        cfg.restart = RestartPolicy::Immediate;
        let mut viewer = Viewer::new(cfg, StdRng::seed_from_u64(3)).unwrap();

        let mut restarted = false;
        for _ in 0..500 {
            if let Some(Tick::Restarted(_)) = viewer.step_once(0.0) {
                restarted = true;
                break;
            }
        }
        assert!(restarted);
        assert_eq!(viewer.controller.cycles_started(), 2);
    }

    #[test]
    fn window_size_leaves_room_for_panels() {
        assert_eq!(window_size(&Config::default()), [640.0, 700.0]);
    }
}
