//! Single-byte preference encoding
//!
//! Bit layout:
//! ```text
//!   7     6     5     4     3     2     1     0
//! ┌─────┬─────┬─────┬───────────┬─────────────────┐
//! │SETUP│  -  │ ISG │ TRACTION  │      MODE       │  sport plus
//! ├─────┼─────┼─────┼─────┬─────┼─────────────────┤
//! │SETUP│  -  │ ISG │AHOLD│  -  │      MODE       │  standard
//! └─────┴─────┴─────┴─────┴─────┴─────────────────┘
//! ```
//!
//! SETUP is always set by [`StateCodec::pack`]. Erased flash reads back as
//! 0xFF, which falls outside the plausible range and is rejected.

use core::ops::RangeInclusive;

use crate::config::Variant;

use super::mode::DriveMode;
use super::preferences::{PreferenceSet, SecondaryState};
use super::traction::TractionState;

/// Marker bit set on every byte written by this firmware
pub const SETUP_BIT: u8 = 0x80;

/// Idle-stop-go enabled bit
pub const IDLE_STOP_GO_BIT: u8 = 0x20;

/// Auto-hold enabled bit (standard panels)
pub const AUTO_HOLD_BIT: u8 = 0x10;

/// Traction level field (sport plus panels)
pub const TRACTION_MASK: u8 = 0x18;
const TRACTION_SHIFT: u8 = 3;

/// Drive mode field
pub const MODE_MASK: u8 = 0x07;

/// Every byte [`StateCodec::pack`] can produce lies in this range
pub const PLAUSIBLE_RANGE: RangeInclusive<u8> = 0x81..=0xB5;

/// Encoding of the built-in default preferences
///
/// Comfort, idle-stop-go on, traction on / auto-hold off.
pub const DEFAULT_BYTE: u8 = 0xA3;

/// Fields of a plausible byte that have no meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Mode code 0, 6 or 7
    ReservedMode(u8),
    /// Traction code 3
    ReservedTraction(u8),
}

/// Packs and unpacks the preference set for one panel variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCodec {
    variant: Variant,
}

impl StateCodec {
    /// Create a codec for a panel variant
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    /// Variant whose layout this codec uses
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Check if a stored byte could have been written by [`Self::pack`]
    ///
    /// Anything outside the range is treated as erased or corrupt storage.
    pub fn is_plausible(byte: u8) -> bool {
        PLAUSIBLE_RANGE.contains(&byte)
    }

    /// Encode preferences
    ///
    /// The layout follows the preferences' own secondary setting.
    pub fn pack(&self, prefs: &PreferenceSet) -> u8 {
        let secondary = match prefs.secondary {
            SecondaryState::Traction(state) => state.bits() << TRACTION_SHIFT,
            SecondaryState::AutoHold(true) => AUTO_HOLD_BIT,
            SecondaryState::AutoHold(false) => 0,
        };
        let idle_stop_go = if prefs.idle_stop_go { IDLE_STOP_GO_BIT } else { 0 };

        SETUP_BIT | idle_stop_go | secondary | prefs.mode.bits()
    }

    /// Decode a stored byte
    ///
    /// Performs no plausibility check; bits outside the variant's layout
    /// are ignored. Fails only when a field holds a code with no meaning.
    pub fn unpack(&self, byte: u8) -> Result<PreferenceSet, CodecError> {
        let mode_bits = byte & MODE_MASK;
        let mode = DriveMode::from_bits(mode_bits).ok_or(CodecError::ReservedMode(mode_bits))?;

        let secondary = match self.variant {
            Variant::SportPlus => {
                let bits = (byte & TRACTION_MASK) >> TRACTION_SHIFT;
                let state =
                    TractionState::from_bits(bits).ok_or(CodecError::ReservedTraction(bits))?;
                SecondaryState::Traction(state)
            }
            Variant::Standard => SecondaryState::AutoHold(byte & AUTO_HOLD_BIT != 0),
        };

        Ok(PreferenceSet {
            mode,
            idle_stop_go: byte & IDLE_STOP_GO_BIT != 0,
            secondary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SPORT_PLUS: StateCodec = StateCodec {
        variant: Variant::SportPlus,
    };
    const STANDARD: StateCodec = StateCodec {
        variant: Variant::Standard,
    };

    #[test]
    fn test_default_byte_decodes_to_defaults() {
        for variant in [Variant::SportPlus, Variant::Standard] {
            let codec = StateCodec::new(variant);
            assert!(StateCodec::is_plausible(DEFAULT_BYTE));
            assert_eq!(
                codec.unpack(DEFAULT_BYTE),
                Ok(PreferenceSet::default_for(variant))
            );
            assert_eq!(codec.pack(&PreferenceSet::default_for(variant)), DEFAULT_BYTE);
        }
    }

    #[test]
    fn test_unpack_smart_isg_off() {
        let prefs = SPORT_PLUS.unpack(0x81).unwrap();
        assert_eq!(prefs.mode, DriveMode::Smart);
        assert!(!prefs.idle_stop_go);
        assert_eq!(prefs.secondary, SecondaryState::Traction(TractionState::On));
    }

    #[test]
    fn test_pack_sets_setup_bit() {
        let prefs = PreferenceSet {
            mode: DriveMode::Smart,
            idle_stop_go: false,
            secondary: SecondaryState::AutoHold(false),
        };
        let byte = STANDARD.pack(&prefs);
        assert_eq!(byte, 0x81);
        assert_ne!(byte & SETUP_BIT, 0);
    }

    #[test]
    fn test_pack_highest_byte() {
        let prefs = PreferenceSet {
            mode: DriveMode::Custom,
            idle_stop_go: true,
            secondary: SecondaryState::Traction(TractionState::TractionAndStabilityOff),
        };
        assert_eq!(SPORT_PLUS.pack(&prefs), 0xB5);

        let prefs = PreferenceSet {
            secondary: SecondaryState::AutoHold(true),
            ..prefs
        };
        assert_eq!(STANDARD.pack(&prefs), 0xB5);
    }

    #[test]
    fn test_erased_flash_is_implausible() {
        assert!(!StateCodec::is_plausible(0xFF));
        assert!(!StateCodec::is_plausible(0x00));
        assert!(!StateCodec::is_plausible(0x80));
        assert!(!StateCodec::is_plausible(0xB6));
        assert!(StateCodec::is_plausible(0x81));
        assert!(StateCodec::is_plausible(0xB5));
    }

    #[test]
    fn test_unpack_reserved_fields() {
        assert_eq!(SPORT_PLUS.unpack(0x80 | 0x20), Err(CodecError::ReservedMode(0)));
        assert_eq!(SPORT_PLUS.unpack(0x86), Err(CodecError::ReservedMode(6)));
        assert_eq!(
            SPORT_PLUS.unpack(0x80 | 0x18 | 0x01),
            Err(CodecError::ReservedTraction(3))
        );
        // Standard panels ignore bit 3
        assert!(STANDARD.unpack(0x80 | 0x18 | 0x01).is_ok());
    }

    #[test]
    fn test_standard_layout() {
        let prefs = STANDARD.unpack(0x80 | 0x10 | 0x04).unwrap();
        assert_eq!(prefs.mode, DriveMode::Sport);
        assert!(!prefs.idle_stop_go);
        assert_eq!(prefs.secondary, SecondaryState::AutoHold(true));
    }

    fn any_sport_plus_prefs() -> impl Strategy<Value = PreferenceSet> {
        (
            prop::sample::select(DriveMode::ALL.to_vec()),
            any::<bool>(),
            prop::sample::select(vec![
                TractionState::On,
                TractionState::Off,
                TractionState::TractionAndStabilityOff,
            ]),
        )
            .prop_map(|(mode, idle_stop_go, traction)| PreferenceSet {
                mode,
                idle_stop_go,
                secondary: SecondaryState::Traction(traction),
            })
    }

    fn any_standard_prefs() -> impl Strategy<Value = PreferenceSet> {
        (
            prop::sample::select(DriveMode::ALL.to_vec()),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(mode, idle_stop_go, auto_hold)| PreferenceSet {
                mode,
                idle_stop_go,
                secondary: SecondaryState::AutoHold(auto_hold),
            })
    }

    proptest! {
        #[test]
        fn test_packed_bytes_roundtrip_sport_plus(prefs in any_sport_plus_prefs()) {
            let byte = SPORT_PLUS.pack(&prefs);
            prop_assert!(StateCodec::is_plausible(byte));
            prop_assert_eq!(SPORT_PLUS.unpack(byte), Ok(prefs));
            prop_assert_eq!(SPORT_PLUS.pack(&SPORT_PLUS.unpack(byte).unwrap()), byte);
        }

        #[test]
        fn test_packed_bytes_roundtrip_standard(prefs in any_standard_prefs()) {
            let byte = STANDARD.pack(&prefs);
            prop_assert!(StateCodec::is_plausible(byte));
            prop_assert_eq!(STANDARD.unpack(byte), Ok(prefs));
        }

        #[test]
        fn test_plausibility_matches_range(byte in any::<u8>()) {
            prop_assert_eq!(StateCodec::is_plausible(byte), (0x81..=0xB5).contains(&byte));
        }
    }
}
