//! "Decoder" text: on hover the label turns into noise and resolves left to
//! right, one character every three ticks.

use crate::rng::XorShift32;

pub const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%&";
/// Milliseconds between frames.
pub const TICK_MS: u32 = 30;
/// Elements carrying this class scramble on hover.
pub const DECODER_CLASS: &str = "decoder-text";

const TICKS_PER_CHAR: usize = 3;

#[derive(Debug, Clone)]
pub struct Scramble {
    target: Vec<char>,
    tick: usize,
    finished: bool,
}

impl Scramble {
    pub fn new(text: &str) -> Self {
        Self {
            target: text.chars().collect(),
            tick: 0,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Characters the next frame shows in the clear.
    pub fn revealed(&self) -> usize {
        self.tick
            .div_ceil(TICKS_PER_CHAR)
            .min(self.target.len())
    }

    /// Next frame of the animation, or `None` once the full text has been
    /// shown. The frame that reveals the last character is the final one.
    pub fn next_frame(&mut self, rng: &mut XorShift32) -> Option<String> {
        if self.finished {
            return None;
        }
        let revealed = self.revealed();
        let frame = self
            .target
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if i < revealed {
                    c
                } else {
                    GLYPHS[rng.below(GLYPHS.len())] as char
                }
            })
            .collect();
        if self.tick >= self.target.len() * TICKS_PER_CHAR {
            self.finished = true;
        }
        self.tick += 1;
        Some(frame)
    }
}
