//! Hardware revision configuration
//!
//! Board revisions differ in how the hold output is wired, which decides
//! the level a simulated press drives it to.

use ksdm_hal::ActiveLevel;

/// First board revision whose hold output is active-high
pub const FIRST_ACTIVE_HIGH_HOLD_REVISION: u8 = 6;

/// Board hardware revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareRevision(pub u8);

impl HardwareRevision {
    /// Revision fitted to the panels currently in the field
    pub const DEFAULT: Self = HardwareRevision(5);

    /// Active level of the hold (traction / auto-hold) output
    pub fn hold_active_level(self) -> ActiveLevel {
        if self.0 < FIRST_ACTIVE_HIGH_HOLD_REVISION {
            ActiveLevel::Low
        } else {
            ActiveLevel::High
        }
    }

    /// Active level of the selector and idle-stop-go outputs
    ///
    /// These lines are active-high on every revision.
    pub fn pulse_active_level(self) -> ActiveLevel {
        ActiveLevel::High
    }

    /// Check if the hold line needs the power-on wake sequence
    pub fn needs_hold_wake(self) -> bool {
        self.0 < FIRST_ACTIVE_HIGH_HOLD_REVISION
    }
}

impl Default for HardwareRevision {
    fn default() -> Self {
        Self::DEFAULT
    }
}
