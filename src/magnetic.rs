//! Magnetic hover: an element leans toward the pointer while it is over it
//! and springs back home when it leaves.

use crate::config::MagneticConfig;
use crate::cursor::{SpringAxis, SpringParams};

/// Elements carrying this class are magnetic.
pub const MAGNETIC_CLASS: &str = "magnetic";
/// Share of the pointer's distance from the centre the element follows.
pub const DEFAULT_STRENGTH: f64 = 0.1;
/// A light, quick spring.
pub const SPRING: SpringParams = SpringParams {
    stiffness: 150.0,
    damping: 15.0,
    mass: 0.1,
};

/// Element box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    fn centre(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct Magnetic {
    strength: f64,
    x: SpringAxis,
    y: SpringAxis,
}

impl Default for Magnetic {
    fn default() -> Self {
        Self::new(DEFAULT_STRENGTH)
    }
}

impl From<&MagneticConfig> for Magnetic {
    fn from(config: &MagneticConfig) -> Self {
        Self::new(config.strength)
    }
}

impl Magnetic {
    pub fn new(strength: f64) -> Self {
        Self {
            strength,
            x: SpringAxis::new(0.0),
            y: SpringAxis::new(0.0),
        }
    }

    /// Pointer at client `(x, y)` over an element occupying `bounds`.
    pub fn pointer_moved(&mut self, x: f64, y: f64, bounds: Bounds) {
        let (cx, cy) = bounds.centre();
        self.x.target = (x - cx) * self.strength;
        self.y.target = (y - cy) * self.strength;
    }

    pub fn pointer_left(&mut self) {
        self.x.target = 0.0;
        self.y.target = 0.0;
    }

    pub fn tick(&mut self, dt: f64) {
        self.x.advance(&SPRING, dt);
        self.y.advance(&SPRING, dt);
    }

    /// Current translation of the element.
    pub fn offset(&self) -> (f64, f64) {
        (self.x.value, self.y.value)
    }

    pub fn target(&self) -> (f64, f64) {
        (self.x.target, self.y.target)
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BUTTON: Bounds = Bounds {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 40.0,
    };

    fn run(m: &mut Magnetic, seconds: f64) {
        for _ in 0..(seconds * 60.0) as usize {
            m.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn target_is_a_tenth_of_the_distance_from_centre() {
        let mut m = Magnetic::default();
        m.pointer_moved(260.0, 80.0, BUTTON);
        let (tx, ty) = m.target();
        assert!((tx - 6.0).abs() < 1e-9);
        assert!((ty - 1.0).abs() < 1e-9);
        // Nothing moves until time passes.
        assert_eq!(m.offset(), (0.0, 0.0));
    }

    #[test]
    fn springs_toward_pointer_then_home() {
        let mut m = Magnetic::default();
        m.pointer_moved(0.0, 0.0, BUTTON);
        run(&mut m, 2.0);
        assert!(m.is_settled());
        assert_eq!(m.offset(), m.target());
        assert!((m.offset().0 + 20.0).abs() < 1e-9);
        assert!((m.offset().1 + 7.0).abs() < 1e-9);

        m.pointer_left();
        run(&mut m, 2.0);
        assert!(m.is_settled());
        assert_eq!(m.offset(), (0.0, 0.0));
    }

    #[test]
    fn strength_comes_from_config() {
        let config = MagneticConfig {
            strength: 0.5,
            ..MagneticConfig::default()
        };
        let mut m = Magnetic::from(&config);
        m.pointer_moved(300.0, 70.0, BUTTON);
        assert_eq!(m.target(), (50.0, 0.0));
    }
}
