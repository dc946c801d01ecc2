//! Scene state and rendering dispatch.

use byeol_core::SceneKind;
use byeol_stars::StarField;
use ratatui::Frame;

use crate::{drifter, milky_way, stars};

/// Cross-frame state shared by the scene renderers.
///
/// Only the parallax offset persists between frames; everything else the
/// scenes draw is computed from the clock and the star field snapshot.
#[derive(Debug, Default)]
pub struct SceneState {
    /// Parallax deflection in [-0.5, 0.5] on both axes.
    parallax: (f32, f32),
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parallax deflection from a pointer position inside the area.
    pub fn point_at(&mut self, column: u16, row: u16, width: u16, height: u16) {
        let x = column as f32 / width.max(1) as f32 - 0.5;
        let y = row as f32 / height.max(1) as f32 - 0.5;
        self.parallax = (x.clamp(-0.5, 0.5), y.clamp(-0.5, 0.5));
    }

    /// Nudge the parallax deflection, for keyboard control.
    pub fn nudge(&mut self, dx: f32, dy: f32) {
        self.parallax = (
            (self.parallax.0 + dx).clamp(-0.5, 0.5),
            (self.parallax.1 + dy).clamp(-0.5, 0.5),
        );
    }

    /// Render the active scene for this frame.
    pub fn render(&self, frame: &mut Frame, scene: SceneKind, elapsed_ms: u64, field: &StarField) {
        match scene {
            SceneKind::Stars => stars::render(frame, field, elapsed_ms),
            SceneKind::MilkyWay => milky_way::render(frame, self.parallax, elapsed_ms),
            SceneKind::Drifter => drifter::render(frame, elapsed_ms),
        }
    }
}
