//! Click-to-copy feedback: a "copied" flag that clears itself a little
//! while after the last copy.

/// Elements with this attribute copy its value when clicked.
pub const COPY_ATTRIBUTE: &str = "data-copy";
/// Set to `"true"` on the element while the copied flag is up.
pub const COPIED_ATTRIBUTE: &str = "data-copied";
/// How long the flag stays up after a copy.
pub const COPIED_MS: u32 = 2000;

/// Identifies one copy, so a stale timer cannot clear a newer flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyToken(u64);

#[derive(Debug, Default, Clone)]
pub struct CopyFeedback {
    copied: bool,
    generation: u64,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    /// Raise the flag. The returned token clears it later.
    pub fn copied(&mut self) -> CopyToken {
        self.generation += 1;
        self.copied = true;
        CopyToken(self.generation)
    }

    /// Timer for `token` fired. Clears the flag only if no copy happened
    /// since; returns whether it did.
    pub fn expire(&mut self, token: CopyToken) -> bool {
        if !self.copied || token.0 != self.generation {
            return false;
        }
        self.copied = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_clears_when_its_timer_fires() {
        let mut f = CopyFeedback::new();
        assert!(!f.is_copied());
        let token = f.copied();
        assert!(f.is_copied());
        assert!(f.expire(token));
        assert!(!f.is_copied());
        assert!(!f.expire(token));
    }

    #[test]
    fn second_copy_outlives_first_timer() {
        let mut f = CopyFeedback::new();
        let first = f.copied();
        let second = f.copied();
        assert!(!f.expire(first));
        assert!(f.is_copied());
        assert!(f.expire(second));
        assert!(!f.is_copied());
    }
}
