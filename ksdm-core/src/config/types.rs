//! Configuration type definitions

use ksdm_protocol::Identity;

use super::hardware::HardwareRevision;

/// Panel variant
///
/// The two supported panels share the drive mode selector and idle-stop-go
/// switch but differ in what the secondary button controls, and therefore
/// in how the persisted byte is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// Secondary button cycles traction / stability control (3 states)
    #[default]
    SportPlus,
    /// Secondary button toggles auto-hold
    Standard,
}

impl Variant {
    /// Identity reported on the command channel
    pub fn identity(self) -> Identity {
        match self {
            Variant::SportPlus => Identity::SportPlus,
            Variant::Standard => Identity::Standard,
        }
    }
}

/// Simulated press timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressTiming {
    /// Hold output active time for a short press (ms)
    pub short_press_ms: u32,
    /// Hold output active time for a long press (ms)
    pub long_press_ms: u32,
    /// Active time and following idle time of one selector/ISG pulse (ms)
    pub pulse_ms: u32,
}

impl PressTiming {
    pub const DEFAULT: Self = Self {
        short_press_ms: 500,
        long_press_ms: 3500,
        pulse_ms: 500,
    };
}

impl Default for PressTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hold-duration thresholds for the traction gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureTiming {
    /// Holds at least this long count as long holds (ms)
    pub long_hold_ms: u64,
    /// Holds at least this long reset traction to on (ms)
    pub reset_hold_ms: u64,
}

impl GestureTiming {
    pub const DEFAULT: Self = Self {
        long_hold_ms: 2500,
        reset_hold_ms: 9000,
    };
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// Panel variant (selects byte layout and secondary gesture)
    pub variant: Variant,
    /// Board revision (selects output polarity)
    pub revision: HardwareRevision,
    /// Simulated press timing
    pub press: PressTiming,
    /// Traction gesture thresholds
    pub gesture: GestureTiming,
    /// Wait after loading state before replaying presses (ms)
    ///
    /// Gives the vehicle module time to finish its own power-on.
    pub startup_settle_ms: u32,
}

impl PanelConfig {
    pub const DEFAULT: Self = Self {
        variant: Variant::SportPlus,
        revision: HardwareRevision::DEFAULT,
        press: PressTiming::DEFAULT,
        gesture: GestureTiming::DEFAULT,
        startup_settle_ms: 4000,
    };

    /// Default configuration for a given variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::DEFAULT
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
