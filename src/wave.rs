//! Sinusoidal wave paths.
//!
//! Each path is the sum of two sines. The primary sine carries a per-index
//! phase so the paths fan out; the secondary is shared.

/// Horizontal distance between samples, in CSS pixels.
pub const DEFAULT_SAMPLE_STEP: f64 = 5.0;
/// Finest sampling a config may ask for.
pub const MIN_SAMPLE_STEP: f64 = 0.5;
/// Upper bound on samples per path, whatever the width and step.
pub const MAX_SAMPLES: usize = 16_384;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    pub amplitude: f64,
    /// Radians per pixel.
    pub frequency: f64,
    /// Radians per unit of `t`.
    pub speed: f64,
}

impl Harmonic {
    fn at(&self, x: f64, t: f64, phase: f64) -> f64 {
        (x * self.frequency + t * self.speed + phase).sin() * self.amplitude
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveShape {
    pub primary: Harmonic,
    pub secondary: Harmonic,
    /// Phase added to the primary sine per path index.
    pub index_phase: f64,
}

impl WaveShape {
    pub const AURORA: WaveShape = WaveShape {
        primary: Harmonic { amplitude: 100.0, frequency: 0.005, speed: 0.02 },
        secondary: Harmonic { amplitude: 50.0, frequency: 0.01, speed: 0.01 },
        index_phase: 1.0,
    };

    /// Vertical position of path `index` at horizontal position `x`.
    pub fn y(&self, x: f64, t: f64, index: usize, height: f64) -> f64 {
        height / 2.0
            + self.primary.at(x, t, index as f64 * self.index_phase)
            + self.secondary.at(x, t, 0.0)
    }

    /// Replace `out` with the samples of path `index` across `width`.
    ///
    /// Samples sit at `x = 0, step, 2*step, ...` while `x < width`.
    pub fn sample_into(
        &self,
        out: &mut Vec<(f64, f64)>,
        width: f64,
        height: f64,
        t: f64,
        index: usize,
        step: f64,
    ) {
        out.clear();
        let n = sample_count(width, step);
        out.reserve(n);
        for k in 0..n {
            let x = k as f64 * step;
            out.push((x, self.y(x, t, index, height)));
        }
    }
}

/// Number of samples a path of `width` pixels gets, at most [`MAX_SAMPLES`].
pub fn sample_count(width: f64, step: f64) -> usize {
    if width.is_nan() || step.is_nan() || width <= 0.0 || step <= 0.0 {
        return 0;
    }
    let n = (width / step).ceil();
    if n >= MAX_SAMPLES as f64 {
        MAX_SAMPLES
    } else {
        n as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn origin_sits_on_the_midline_at_t0() {
        let y = WaveShape::AURORA.y(0.0, 0.0, 0, 600.0);
        assert!((y - 300.0).abs() < EPS);
    }

    #[test]
    fn origin_at_t20() {
        let y = WaveShape::AURORA.y(0.0, 20.0, 0, 600.0);
        let expected = 300.0 + (0.4f64).sin() * 100.0 + (0.2f64).sin() * 50.0;
        assert!((y - expected).abs() < EPS);
        assert!((y - 300.0 - 48.87).abs() < 0.01);
    }

    #[test]
    fn index_shifts_primary_phase() {
        let a = WaveShape::AURORA.y(0.0, 0.0, 1, 0.0);
        assert!((a - (1.0f64).sin() * 100.0).abs() < EPS);
    }

    #[test]
    fn sample_grid_stops_before_width() {
        let mut buf = Vec::new();
        WaveShape::AURORA.sample_into(&mut buf, 12.0, 100.0, 0.0, 0, 5.0);
        let xs: Vec<f64> = buf.iter().map(|(x, _)| *x).collect();
        assert_eq!(xs, vec![0.0, 5.0, 10.0]);

        WaveShape::AURORA.sample_into(&mut buf, 10.0, 100.0, 0.0, 0, 5.0);
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn degenerate_widths_have_no_samples() {
        assert_eq!(sample_count(0.0, 5.0), 0);
        assert_eq!(sample_count(-3.0, 5.0), 0);
        assert_eq!(sample_count(f64::NAN, 5.0), 0);
        assert_eq!(sample_count(100.0, 0.0), 0);
    }

    #[test]
    fn tiny_steps_are_capped() {
        assert_eq!(sample_count(1920.0, 1e-300), MAX_SAMPLES);
        assert_eq!(sample_count(f64::INFINITY, 5.0), MAX_SAMPLES);

        let mut buf = Vec::new();
        WaveShape::AURORA.sample_into(&mut buf, 1920.0, 1080.0, 0.0, 0, 1e-6);
        assert_eq!(buf.len(), MAX_SAMPLES);
    }
}
