//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Electrical level that means "asserted" on a line
///
/// Board revisions differ in which level a simulated press uses, so the
/// polarity travels with the pin instead of being baked into drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Asserted when driven high
    #[default]
    High,
    /// Asserted when driven low
    Low,
}

impl ActiveLevel {
    /// Pin level (true = high) for a logical asserted/released state
    pub fn level(self, asserted: bool) -> bool {
        match self {
            ActiveLevel::High => asserted,
            ActiveLevel::Low => !asserted,
        }
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Drive the pin to its asserted or released level
    fn set_asserted(&mut self, active: ActiveLevel, asserted: bool) {
        self.set_state(active.level(asserted));
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_level_mapping() {
        assert!(ActiveLevel::High.level(true));
        assert!(!ActiveLevel::High.level(false));
        assert!(!ActiveLevel::Low.level(true));
        assert!(ActiveLevel::Low.level(false));
    }

    #[test]
    fn test_set_asserted_respects_polarity() {
        let mut pin = MockPin { high: false };

        pin.set_asserted(ActiveLevel::Low, false);
        assert!(pin.is_set_high());

        pin.set_asserted(ActiveLevel::Low, true);
        assert!(!pin.is_set_high());

        pin.set_asserted(ActiveLevel::High, true);
        assert!(pin.is_set_high());
    }
}
