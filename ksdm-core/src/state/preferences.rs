//! Preference set
//!
//! The logical state the panel persists: drive mode, idle-stop-go and the
//! variant-specific secondary setting.

use crate::config::Variant;

use super::mode::DriveMode;
use super::traction::TractionState;

/// Variant-specific secondary setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SecondaryState {
    /// Traction / stability level (sport plus panels)
    Traction(TractionState),
    /// Auto-hold enabled (standard panels)
    AutoHold(bool),
}

impl SecondaryState {
    /// Vehicle power-on default for a variant
    pub fn default_for(variant: Variant) -> Self {
        match variant {
            Variant::SportPlus => SecondaryState::Traction(TractionState::On),
            Variant::Standard => SecondaryState::AutoHold(false),
        }
    }

    /// Variant this setting belongs to
    pub fn variant(self) -> Variant {
        match self {
            SecondaryState::Traction(_) => Variant::SportPlus,
            SecondaryState::AutoHold(_) => Variant::Standard,
        }
    }

    /// Traction level, if this is a sport plus setting
    pub fn traction(self) -> Option<TractionState> {
        match self {
            SecondaryState::Traction(state) => Some(state),
            SecondaryState::AutoHold(_) => None,
        }
    }
}

/// Everything the panel remembers across power cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PreferenceSet {
    /// Selected drive mode
    pub mode: DriveMode,
    /// Idle-stop-go enabled
    pub idle_stop_go: bool,
    /// Traction level or auto-hold, depending on variant
    pub secondary: SecondaryState,
}

impl PreferenceSet {
    /// Built-in default: comfort, idle-stop-go on, traction on / auto-hold off
    pub fn default_for(variant: Variant) -> Self {
        Self {
            mode: DriveMode::Comfort,
            idle_stop_go: true,
            secondary: SecondaryState::default_for(variant),
        }
    }

    /// Variant these preferences belong to
    pub fn variant(&self) -> Variant {
        self.secondary.variant()
    }
}
