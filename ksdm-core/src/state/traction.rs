//! Traction / stability control state
//!
//! The vehicle has three traction levels, cycled with press-and-hold
//! gestures on the secondary button. The hold duration decides the
//! transition; see [`TractionState::after_hold`].

use crate::config::GestureTiming;
use crate::traits::PressKind;

/// Traction / stability control level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TractionState {
    /// Traction and stability control on (vehicle default)
    #[default]
    On = 0,
    /// Traction control off, stability control on
    Off = 1,
    /// Traction and stability control both off
    TractionAndStabilityOff = 2,
}

impl TractionState {
    /// State code as stored in the persisted byte
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Parse a state code (3 is unused)
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(TractionState::On),
            1 => Some(TractionState::Off),
            2 => Some(TractionState::TractionAndStabilityOff),
            _ => None,
        }
    }

    /// State after a completed hold of `held_ms`
    ///
    /// - short hold: ON -> OFF, OFF -> ON, TS -> OFF
    /// - long hold: ON/OFF -> TS, TS -> OFF
    /// - reset hold: always ON
    pub fn after_hold(self, held_ms: u64, timing: &GestureTiming) -> Self {
        if held_ms >= timing.reset_hold_ms {
            return TractionState::On;
        }

        if held_ms < timing.long_hold_ms {
            match self {
                TractionState::On => TractionState::Off,
                TractionState::Off => TractionState::On,
                TractionState::TractionAndStabilityOff => TractionState::Off,
            }
        } else if self != TractionState::TractionAndStabilityOff {
            TractionState::TractionAndStabilityOff
        } else {
            TractionState::Off
        }
    }

    /// Press that re-asserts this state on the vehicle module
    ///
    /// The module drops back to ON whenever sport mode is entered or left.
    pub fn correction_press(self) -> Option<PressKind> {
        match self {
            TractionState::On => None,
            TractionState::Off => Some(PressKind::Short),
            TractionState::TractionAndStabilityOff => Some(PressKind::Long),
        }
    }
}
