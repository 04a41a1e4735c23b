//! Secondary button gestures
//!
//! Sport plus panels decode press-and-hold gestures into a traction level;
//! standard panels treat the button as a plain auto-hold toggle. Both sit
//! behind [`SecondaryGesture`] so the control loop does not care which is
//! fitted.

use crate::config::{GestureTiming, Variant};
use crate::state::SecondaryState;

use super::latch::InputLatch;

/// Decoder for the secondary button
pub trait SecondaryGesture {
    /// Feed one sample of the secondary input
    ///
    /// Returns the new secondary state when a gesture completed on this
    /// sample, even if the state ends up unchanged.
    fn sample(
        &mut self,
        level_high: bool,
        now_ms: u64,
        current: SecondaryState,
    ) -> Option<SecondaryState>;

    /// Forget any gesture in progress
    fn reset(&mut self);
}

/// Start instant of the hold in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldTimer {
    press_start_ms: u64,
    held: bool,
}

impl HoldTimer {
    /// Create an idle timer
    pub const fn new() -> Self {
        Self {
            press_start_ms: 0,
            held: false,
        }
    }

    /// Check if a hold is in progress
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Record the start of a hold
    pub fn start(&mut self, now_ms: u64) {
        self.press_start_ms = now_ms;
        self.held = true;
    }

    /// End the hold and return how long it lasted
    pub fn release(&mut self, now_ms: u64) -> u64 {
        self.held = false;
        now_ms.saturating_sub(self.press_start_ms)
    }

    /// Drop the hold without measuring it
    pub fn clear(&mut self) {
        self.held = false;
    }
}

/// Press-and-hold traction gesture
///
/// The hold starts on the first high sample and is evaluated on the first
/// low sample after it. See [`crate::state::TractionState::after_hold`]
/// for the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TractionGesture {
    timing: GestureTiming,
    timer: HoldTimer,
}

impl TractionGesture {
    pub fn new(timing: GestureTiming) -> Self {
        Self {
            timing,
            timer: HoldTimer::new(),
        }
    }

    /// Check if a hold is in progress
    pub fn is_held(&self) -> bool {
        self.timer.is_held()
    }
}

impl SecondaryGesture for TractionGesture {
    fn sample(
        &mut self,
        level_high: bool,
        now_ms: u64,
        current: SecondaryState,
    ) -> Option<SecondaryState> {
        if level_high {
            if !self.timer.is_held() {
                self.timer.start(now_ms);
            }
            return None;
        }

        if !self.timer.is_held() {
            return None;
        }

        let held_ms = self.timer.release(now_ms);
        let traction = current.traction().unwrap_or_default();
        Some(SecondaryState::Traction(
            traction.after_hold(held_ms, &self.timing),
        ))
    }

    fn reset(&mut self) {
        self.timer.clear();
    }
}

/// Auto-hold toggle
///
/// Flips auto-hold once per activation of the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AutoHoldToggle {
    latch: InputLatch,
}

impl AutoHoldToggle {
    pub const fn new() -> Self {
        Self {
            latch: InputLatch::new(),
        }
    }
}

impl SecondaryGesture for AutoHoldToggle {
    fn sample(
        &mut self,
        level_high: bool,
        _now_ms: u64,
        current: SecondaryState,
    ) -> Option<SecondaryState> {
        if !self.latch.sample(level_high) {
            return None;
        }

        let enabled = match current {
            SecondaryState::AutoHold(enabled) => enabled,
            SecondaryState::Traction(_) => false,
        };
        Some(SecondaryState::AutoHold(!enabled))
    }

    fn reset(&mut self) {
        self.latch = InputLatch::new();
    }
}

/// Secondary gesture of the fitted panel variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SecondaryInput {
    Traction(TractionGesture),
    AutoHold(AutoHoldToggle),
}

impl SecondaryInput {
    /// Pick the gesture for a panel variant
    pub fn for_variant(variant: Variant, timing: GestureTiming) -> Self {
        match variant {
            Variant::SportPlus => SecondaryInput::Traction(TractionGesture::new(timing)),
            Variant::Standard => SecondaryInput::AutoHold(AutoHoldToggle::new()),
        }
    }
}

impl SecondaryGesture for SecondaryInput {
    fn sample(
        &mut self,
        level_high: bool,
        now_ms: u64,
        current: SecondaryState,
    ) -> Option<SecondaryState> {
        match self {
            SecondaryInput::Traction(gesture) => gesture.sample(level_high, now_ms, current),
            SecondaryInput::AutoHold(toggle) => toggle.sample(level_high, now_ms, current),
        }
    }

    fn reset(&mut self) {
        match self {
            SecondaryInput::Traction(gesture) => gesture.reset(),
            SecondaryInput::AutoHold(toggle) => toggle.reset(),
        }
    }
}
