//! Spin sequencer — logical spin numbers

use serde::{Deserialize, Serialize};

/// Monotonic spin counter
///
/// Starts at 0; `next()` yields 1, 2, 3, … The session resets it on every
/// structural candidate edit, so spin numbers count from the last edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinSequencer {
    current: u64,
}

impl SpinSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance and return the new spin number
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Last allocated spin number (0 = none since reset)
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Number the next spin will get
    pub fn peek_next(&self) -> u64 {
        self.current + 1
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}
