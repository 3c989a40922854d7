//! Custom pointer: a ring that trails the mouse on a spring and a dot that
//! sits exactly on it.

use crate::config::CursorConfig;

/// Ring diameter in CSS pixels.
pub const RING_SIZE: f64 = 32.0;
/// Offset of the 8 px dot inside the ring box.
pub const DOT_OFFSET: f64 = 12.0;
/// Where both parts wait before the first pointer event.
pub const OFFSCREEN: f64 = -100.0;
/// Elements that put the cursor into its hover state, directly or through
/// an ancestor.
pub const INTERACTIVE_SELECTOR: &str = "a, button, .cursor-interactive";

// Longest integration sub-step, and the longest frame gap honoured at all.
const MAX_SUBSTEP: f64 = 1.0 / 240.0;
const MAX_DT: f64 = 0.1;
// Below both, the spring is considered at rest and snaps to its target.
const REST_DISTANCE: f64 = 0.01;
const REST_VELOCITY: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl From<&CursorConfig> for SpringParams {
    fn from(c: &CursorConfig) -> Self {
        Self {
            stiffness: c.stiffness,
            damping: c.damping,
            mass: c.mass,
        }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        (&CursorConfig::default()).into()
    }
}

/// One axis of a damped spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringAxis {
    pub value: f64,
    pub velocity: f64,
    pub target: f64,
}

impl SpringAxis {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn is_at_rest(&self) -> bool {
        (self.target - self.value).abs() < REST_DISTANCE && self.velocity.abs() < REST_VELOCITY
    }

    /// Semi-implicit Euler over `dt` seconds.
    pub fn advance(&mut self, params: &SpringParams, dt: f64) {
        let mut remaining = dt.clamp(0.0, MAX_DT);
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            let force =
                params.stiffness * (self.target - self.value) - params.damping * self.velocity;
            self.velocity += force / params.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if self.is_at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }
}

/// Visual state the browser layer turns into CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorAppearance {
    pub scale: f64,
    pub opacity: f64,
    /// Ring is filled solid while hovering something interactive.
    pub filled: bool,
}

#[derive(Debug, Clone)]
pub struct SmartCursor {
    params: SpringParams,
    ring_x: SpringAxis,
    ring_y: SpringAxis,
    dot: (f64, f64),
    hovering: bool,
    pressed: bool,
}

impl Default for SmartCursor {
    fn default() -> Self {
        Self::new(SpringParams::default())
    }
}

impl SmartCursor {
    pub fn new(params: SpringParams) -> Self {
        Self {
            params,
            ring_x: SpringAxis::new(OFFSCREEN),
            ring_y: SpringAxis::new(OFFSCREEN),
            dot: (OFFSCREEN, OFFSCREEN),
            hovering: false,
            pressed: false,
        }
    }

    /// Pointer moved to client coordinates `(x, y)`.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        let half = RING_SIZE / 2.0;
        let target = (x - half, y - half);
        self.ring_x.target = target.0;
        self.ring_y.target = target.1;
        self.dot = target;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Advance the ring spring by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.ring_x.advance(&self.params, dt);
        self.ring_y.advance(&self.params, dt);
    }

    pub fn is_settled(&self) -> bool {
        self.ring_x.is_at_rest() && self.ring_y.is_at_rest()
    }

    /// Top-left corner of the ring.
    pub fn ring_position(&self) -> (f64, f64) {
        (self.ring_x.value, self.ring_y.value)
    }

    /// Top-left corner of the dot.
    pub fn dot_position(&self) -> (f64, f64) {
        (self.dot.0 + DOT_OFFSET, self.dot.1 + DOT_OFFSET)
    }

    pub fn appearance(&self) -> CursorAppearance {
        let scale = if self.pressed {
            0.8
        } else if self.hovering {
            1.5
        } else {
            1.0
        };
        CursorAppearance {
            scale,
            opacity: if self.hovering { 0.5 } else { 0.3 },
            filled: self.hovering,
        }
    }
}
