//! GPIO wrappers
//!
//! Thin newtypes that let embassy-rp pins stand in for the `ksdm-hal`
//! pin traits.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::Peri;

/// Panel input line
///
/// Pulled down so a disconnected control reads as released.
pub struct PanelInput<'d> {
    pin: Input<'d>,
}

impl<'d> PanelInput<'d> {
    /// Configure a pin as a pulled-down input
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Input::new(pin, Pull::Down),
        }
    }
}

impl ksdm_hal::InputPin for PanelInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Simulated switch output line
pub struct PanelOutput<'d> {
    pin: Output<'d>,
}

impl<'d> PanelOutput<'d> {
    /// Configure a pin as an output, starting at `high`
    ///
    /// Start at the released level of the line to avoid a glitch press
    /// before the press emulator primes it.
    pub fn new(pin: Peri<'d, impl Pin>, high: bool) -> Self {
        let level = if high { Level::High } else { Level::Low };
        Self {
            pin: Output::new(pin, level),
        }
    }
}

impl ksdm_hal::OutputPin for PanelOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
