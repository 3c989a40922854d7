//! The animated background: gradient wash plus a few drifting waves.

use tracing::debug;

use crate::clock::AnimationClock;
use crate::config::AuroraConfig;
use crate::palette::{LinearGradient, Preset, Stroke};
use crate::surface::Surface;
use crate::theme::Theme;
use crate::wave::WaveShape;

/// Background state. Owns its clock and viewport size; the theme is pushed
/// in from outside.
#[derive(Debug)]
pub struct AuroraScene {
    width: f64,
    height: f64,
    clock: AnimationClock,
    theme: Theme,
    preset: Preset,
    sample_step: f64,
    // Overrides the preset's width for every theme.
    line_width: Option<f64>,
    // Reused per path to avoid allocating every frame.
    samples: Vec<(f64, f64)>,
}

impl AuroraScene {
    pub fn new(width: f64, height: f64, config: &AuroraConfig) -> Self {
        debug!(width, height, preset = ?config.preset, "aurora scene created");
        Self {
            width,
            height,
            clock: AnimationClock::new(config.step),
            theme: Theme::default(),
            preset: config.preset,
            sample_step: config.sample_step,
            line_width: config.line_width,
            samples: Vec::new(),
        }
    }

    pub fn t(&self) -> f64 {
        self.clock.t()
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// New viewport size, used from the next frame on. The clock keeps
    /// running.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Takes effect on the next frame, without any blending.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Gradient the next frame will paint.
    pub fn gradient(&self) -> LinearGradient {
        self.preset
            .gradient(self.theme, self.clock.t(), self.width, self.height)
    }

    /// Stroke of wave `index` for the next frame.
    pub fn stroke(&self, index: usize) -> Stroke {
        let stroke = self.preset.stroke(self.theme, index, self.clock.t());
        Stroke {
            width: self.line_width.unwrap_or(stroke.width),
            ..stroke
        }
    }

    /// Paint one frame and advance the clock.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let (w, h) = (self.width, self.height);
        let t = self.clock.t();

        surface.clear(w, h);
        surface.fill_gradient(&self.gradient(), w, h);

        for i in 0..self.preset.wave_count(self.theme) {
            let stroke = self.stroke(i);
            WaveShape::AURORA.sample_into(&mut self.samples, w, h, t, i, self.sample_step);
            surface.stroke_path(&self.samples, &stroke);
        }

        self.clock.tick();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn scene(preset: Preset) -> AuroraScene {
        let config = AuroraConfig {
            preset,
            ..AuroraConfig::default()
        };
        AuroraScene::new(800.0, 600.0, &config)
    }

    #[test]
    fn frame_order_is_clear_gradient_waves() {
        let mut s = scene(Preset::Aurora);
        let mut surface = RecordingSurface::new();
        s.render(&mut surface);

        let cmds = surface.take();
        assert_eq!(cmds.len(), 2 + 5);
        assert!(matches!(cmds[0], DrawCommand::Clear { width, height } if width == 800.0 && height == 600.0));
        assert!(matches!(cmds[1], DrawCommand::FillGradient { .. }));
        assert!(cmds[2..]
            .iter()
            .all(|c| matches!(c, DrawCommand::StrokePath { points, .. } if points.len() == 160)));
    }

    #[test]
    fn ribbon_draws_three_thin_waves_in_light_and_five_in_dark() {
        let mut s = scene(Preset::Ribbon);
        let mut surface = RecordingSurface::new();
        s.render(&mut surface);
        assert_eq!(surface.paths().count(), 3);
        assert!(surface.paths().all(|(_, stroke)| stroke.width == 1.0));

        s.set_theme(Theme::Dark);
        surface.take();
        s.render(&mut surface);
        assert_eq!(surface.paths().count(), 5);
        assert!(surface.paths().all(|(_, stroke)| stroke.width == 2.0));
    }

    #[test]
    fn smallest_sample_step_stays_bounded() {
        let config = AuroraConfig {
            sample_step: crate::wave::MIN_SAMPLE_STEP,
            ..AuroraConfig::default()
        };
        let mut s = AuroraScene::new(1e9, 600.0, &config);
        let mut surface = RecordingSurface::new();
        s.render(&mut surface);
        assert!(surface
            .paths()
            .all(|(points, _)| points.len() == crate::wave::MAX_SAMPLES));
    }

    #[test]
    fn first_frame_samples_use_t_zero() {
        let mut s = scene(Preset::Aurora);
        let mut surface = RecordingSurface::new();
        s.render(&mut surface);
        let (points, _) = surface.paths().next().unwrap();
        assert_eq!(points[0], (0.0, 300.0));
        assert_eq!(s.t(), 0.5);
    }

    #[test]
    fn line_width_override_applies_to_every_wave() {
        let config = AuroraConfig {
            line_width: Some(3.0),
            ..AuroraConfig::default()
        };
        let mut s = AuroraScene::new(100.0, 100.0, &config);
        let mut surface = RecordingSurface::new();
        s.render(&mut surface);
        assert!(surface.paths().all(|(_, stroke)| stroke.width == 3.0));
    }
}
