//! Frame clock for the background animation.
//!
//! `t` is a plain scalar advanced by a fixed step once per rendered frame.
//! It never resets while the renderer is attached. Anything periodic is
//! derived from it through `sin`, so it does not need to wrap.

/// Increment applied to `t` after every rendered frame.
pub const DEFAULT_STEP: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    t: f64,
    step: f64,
    frames: u64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl AnimationClock {
    /// Clock at `t = 0`. `step` is validated by the config layer and must be
    /// finite and positive.
    pub fn new(step: f64) -> Self {
        debug_assert!(step.is_finite() && step > 0.0);
        Self { t: 0.0, step, frames: 0 }
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance one frame and return the new `t`.
    pub fn tick(&mut self) -> f64 {
        self.frames += 1;
        // Recomputed from the frame count so the sequence stays exact for
        // steps like 0.5 and never drifts from `frames * step`.
        self.t = self.frames as f64 * self.step;
        self.t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = AnimationClock::default();
        assert_eq!(clock.t(), 0.0);
        assert_eq!(clock.frames(), 0);
        assert_eq!(clock.step(), DEFAULT_STEP);
    }

    #[test]
    fn forty_frames_reach_twenty() {
        let mut clock = AnimationClock::default();
        for _ in 0..40 {
            clock.tick();
        }
        assert_eq!(clock.t(), 20.0);
        assert_eq!(clock.frames(), 40);
    }
}
