//! Scroll-driven chrome: the floating header, its status line, and the
//! scroll-to-top button.

use crate::rng::XorShift32;

/// Scroll offset past which the scroll-to-top button shows.
pub const SCROLL_TOP_THRESHOLD: f64 = 400.0;
/// Near the top the header is always shown.
pub const TOP_ZONE: f64 = 50.0;
/// Scrolling deeper than this arms the "welcome back" message.
pub const ARM_DEPTH: f64 = 200.0;

pub const WELCOME_MESSAGES: [&str; 6] = [
    "WELCOME, EXPLORER",
    "HELLO, VISITOR",
    "GREETINGS, TRAVELER",
    "WELCOME ABOARD",
    "NICE TO SEE YOU",
    "READY TO EXPLORE?",
];

pub const RETURN_MESSAGES: [&str; 6] = [
    "BACK SO SOON?",
    "WELCOME BACK",
    "MISSED SOMETHING?",
    "RETURN DETECTED",
    "GOOD TO SEE YOU AGAIN",
    "READY FOR MORE?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollUpdate {
    pub header_visible: bool,
    pub scroll_top_visible: bool,
    /// Set when the status line changed on this event.
    pub message: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct ScrollWatch {
    last_y: f64,
    armed: bool,
    message: &'static str,
    rng: XorShift32,
}

impl ScrollWatch {
    /// Starts at the top of the page with a random welcome line.
    pub fn new(mut rng: XorShift32) -> Self {
        let message = WELCOME_MESSAGES[rng.below(WELCOME_MESSAGES.len())];
        Self {
            last_y: 0.0,
            armed: false,
            message,
            rng,
        }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn on_scroll(&mut self, y: f64) -> ScrollUpdate {
        let scrolling_up = y <= self.last_y;

        if y > ARM_DEPTH {
            self.armed = true;
        }

        let mut changed = None;
        if self.armed && y < TOP_ZONE && scrolling_up {
            self.message = RETURN_MESSAGES[self.rng.below(RETURN_MESSAGES.len())];
            self.armed = false;
            changed = Some(self.message);
        }

        self.last_y = y;
        ScrollUpdate {
            header_visible: y < TOP_ZONE || scrolling_up,
            scroll_top_visible: y > SCROLL_TOP_THRESHOLD,
            message: changed,
        }
    }
}
