//! Drawing target for the background scene.

use crate::palette::{LinearGradient, Stroke};

/// The handful of 2-D operations the scene needs.
///
/// The browser implementation wraps a canvas 2-D context. The scene calls
/// these in a fixed order each frame: one `clear`, one `fill_gradient`, then
/// one `stroke_path` per wave.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_gradient(&mut self, gradient: &LinearGradient, width: f64, height: f64);
    fn stroke_path(&mut self, points: &[(f64, f64)], stroke: &Stroke);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    FillGradient { gradient: LinearGradient, width: f64, height: f64 },
    StrokePath { points: Vec<(f64, f64)>, stroke: Stroke },
}

/// Surface that records what was drawn instead of drawing it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn gradients(&self) -> impl Iterator<Item = &LinearGradient> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillGradient { gradient, .. } => Some(gradient),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = (&[(f64, f64)], &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokePath { points, stroke } => Some((points.as_slice(), stroke)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_gradient(&mut self, gradient: &LinearGradient, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillGradient {
            gradient: *gradient,
            width,
            height,
        });
    }

    fn stroke_path(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokePath {
            points: points.to_vec(),
            stroke: *stroke,
        });
    }
}
