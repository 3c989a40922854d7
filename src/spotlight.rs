//! Spotlight cards: a glow that follows the pointer inside the card.

/// Elements carrying this class get a spotlight.
pub const SPOTLIGHT_CLASS: &str = "spotlight-card";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spotlight {
    position: (f64, f64),
    opacity: f64,
    focused: bool,
}

impl Spotlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer at client `(x, y)` over a card whose box starts at
    /// `(left, top)`.
    pub fn pointer_moved(&mut self, x: f64, y: f64, left: f64, top: f64) {
        self.position = (x - left, y - top);
    }

    pub fn pointer_entered(&mut self) {
        self.opacity = 1.0;
    }

    pub fn pointer_left(&mut self) {
        self.opacity = 0.0;
    }

    pub fn focused(&mut self) {
        self.focused = true;
        self.opacity = 1.0;
    }

    pub fn blurred(&mut self) {
        self.focused = false;
        self.opacity = 0.0;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// CSS custom properties to set on the card element.
    pub fn css_vars(&self) -> [(&'static str, String); 3] {
        [
            ("--mouse-x", format!("{}px", self.position.0)),
            ("--mouse-y", format!("{}px", self.position.1)),
            ("--spotlight-opacity", self.opacity.to_string()),
        ]
    }
}
