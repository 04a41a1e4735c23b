//! Drive mode cycling
//!
//! Drive modes are ordered and the selector saturates at both ends. It is
//! not a circular selector: turning past CUSTOM or SMART does nothing.

/// Drive modes, in selector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DriveMode {
    Smart = 1,
    Eco = 2,
    Comfort = 3,
    Sport = 4,
    Custom = 5,
}

impl DriveMode {
    /// All modes, lowest first
    pub const ALL: [DriveMode; 5] = [
        DriveMode::Smart,
        DriveMode::Eco,
        DriveMode::Comfort,
        DriveMode::Sport,
        DriveMode::Custom,
    ];

    /// Lowest mode
    pub const FIRST: DriveMode = DriveMode::Smart;

    /// Highest mode
    pub const LAST: DriveMode = DriveMode::Custom;

    /// Mode code as stored in the persisted byte
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Parse a mode code
    ///
    /// Code 0 is reserved and codes above 5 are unused.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(DriveMode::Smart),
            2 => Some(DriveMode::Eco),
            3 => Some(DriveMode::Comfort),
            4 => Some(DriveMode::Sport),
            5 => Some(DriveMode::Custom),
            _ => None,
        }
    }

    /// Next mode clockwise, saturating at [`DriveMode::LAST`]
    pub fn increment(self) -> Self {
        DriveMode::from_bits(self.bits() + 1).unwrap_or(DriveMode::LAST)
    }

    /// Next mode counter-clockwise, saturating at [`DriveMode::FIRST`]
    pub fn decrement(self) -> Self {
        DriveMode::from_bits(self.bits() - 1).unwrap_or(DriveMode::FIRST)
    }

    /// Check if this is sport mode
    ///
    /// The vehicle module resets its traction setting whenever sport mode
    /// is entered or left.
    pub fn is_sport(self) -> bool {
        self == DriveMode::Sport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_increment_order() {
        assert_eq!(DriveMode::Smart.increment(), DriveMode::Eco);
        assert_eq!(DriveMode::Eco.increment(), DriveMode::Comfort);
        assert_eq!(DriveMode::Comfort.increment(), DriveMode::Sport);
        assert_eq!(DriveMode::Sport.increment(), DriveMode::Custom);
    }

    #[test]
    fn test_saturates_at_both_ends() {
        assert_eq!(DriveMode::Custom.increment(), DriveMode::Custom);
        assert_eq!(DriveMode::Smart.decrement(), DriveMode::Smart);
    }

    #[test]
    fn test_no_wraparound() {
        // A circular selector would go CUSTOM -> SMART
        assert_ne!(DriveMode::Custom.increment(), DriveMode::Smart);
        assert_ne!(DriveMode::Smart.decrement(), DriveMode::Custom);
    }

    #[test]
    fn test_bits_roundtrip() {
        for mode in DriveMode::ALL {
            assert_eq!(DriveMode::from_bits(mode.bits()), Some(mode));
        }
        assert_eq!(DriveMode::from_bits(0), None);
        assert_eq!(DriveMode::from_bits(6), None);
        assert_eq!(DriveMode::from_bits(7), None);
    }

    fn any_mode() -> impl Strategy<Value = DriveMode> {
        prop::sample::select(DriveMode::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn test_repeated_increment_never_exceeds_custom(start in any_mode(), steps in 0usize..20) {
            let mut mode = start;
            for _ in 0..steps {
                let next = mode.increment();
                prop_assert!(next >= mode);
                prop_assert!(next <= DriveMode::Custom);
                mode = next;
            }
        }

        #[test]
        fn test_repeated_decrement_never_below_smart(start in any_mode(), steps in 0usize..20) {
            let mut mode = start;
            for _ in 0..steps {
                let next = mode.decrement();
                prop_assert!(next <= mode);
                prop_assert!(next >= DriveMode::Smart);
                mode = next;
            }
        }
    }
}
