//! Press actuator trait
//!
//! Abstracts the outputs that stand in for the factory switches. All
//! operations block until the simulated press has fully finished.

/// Length of a simulated hold-button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    /// Brief press (toggles traction, auto-hold)
    Short,
    /// Sustained press (disables traction and stability together)
    Long,
}

/// Selector rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards higher drive modes
    Clockwise,
    /// Towards lower drive modes
    CounterClockwise,
}

/// Trait for simulated switch actuation
///
/// Implementations drive the output lines with the polarity and timing of
/// the fitted board. Presses are strictly sequential: a call returns only
/// after its outputs are back at their released level.
pub trait PressActuator {
    /// Drive every output to its released level
    ///
    /// Called once at power-on, before anything else is replayed.
    fn prime(&mut self);

    /// Press and release the hold button
    fn press_hold(&mut self, kind: PressKind);

    /// Short press of the hold button
    fn short_press(&mut self) {
        self.press_hold(PressKind::Short);
    }

    /// Long press of the hold button
    fn long_press(&mut self) {
        self.press_hold(PressKind::Long);
    }

    /// Pulse the idle-stop-go switch once
    fn toggle_idle_stop_go(&mut self);

    /// Turn the drive mode selector by `times` detents
    fn pulse(&mut self, direction: Direction, times: u8);
}
