//! Per-input activation latch

/// One-shot latch for a polled input
///
/// Fires on the first high sample after the input was released, then stays
/// quiet until a low sample re-arms it. No timers are involved; the loop
/// period only has to be shorter than a human press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputLatch {
    armed: bool,
}

impl InputLatch {
    /// Create an armed latch
    pub const fn new() -> Self {
        Self { armed: true }
    }

    /// Feed one sample
    ///
    /// Returns true exactly once per activation.
    pub fn sample(&mut self, level_high: bool) -> bool {
        if !level_high {
            self.armed = true;
            return false;
        }

        if self.armed {
            self.armed = false;
            true
        } else {
            false
        }
    }

    /// Check if the next high sample will fire
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Default for InputLatch {
    fn default() -> Self {
        Self::new()
    }
}
