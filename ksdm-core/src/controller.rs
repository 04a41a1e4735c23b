//! Polling control loop
//!
//! The controller owns the preference set, the input latches and the
//! secondary gesture. The firmware feeds it one [`InputSample`] per tick
//! together with a monotonic timestamp; everything it does in response is
//! returned as a [`TickReport`] so the caller can log it.
//!
//! ```text
//!   InputSample ──► latches / gesture ──► PreferenceSet ──► StateCodec
//!                          │                                   │
//!                          ▼                                   ▼
//!                   PressActuator                          ByteStore
//!                (sport correction)                     (when dirty)
//! ```

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::boot::{self, BootReport, ReplayPlan};
use crate::config::PanelConfig;
use crate::input::{InputLatch, SecondaryGesture, SecondaryInput};
use crate::state::{DriveMode, PreferenceSet, SecondaryState, StateCodec};
use crate::traits::{ByteStore, PressActuator, PressKind, StoreError};

/// Maximum events a single tick can produce
pub const MAX_TICK_EVENTS: usize = 8;

/// Levels of the four panel inputs for one tick (true = pressed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSample {
    /// Selector turned towards higher modes
    pub mode_up: bool,
    /// Selector turned towards lower modes
    pub mode_down: bool,
    /// Idle-stop-go switch
    pub idle_stop_go: bool,
    /// Traction / auto-hold button
    pub secondary: bool,
}

/// Something the controller observed or did during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelEvent {
    /// Drive mode moved one step
    ModeChanged { from: DriveMode, to: DriveMode },
    /// Mode input at the end of the range, mode unchanged
    ModeSaturated(DriveMode),
    /// Hold press replayed after entering or leaving sport mode
    TractionCorrected(PressKind),
    /// Idle-stop-go switched (new state)
    IdleStopGoToggled(bool),
    /// Secondary gesture completed (new state)
    SecondaryChanged(SecondaryState),
}

/// A write of the preference byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Persisted {
    /// Byte that was written
    pub byte: u8,
    /// Outcome of the verified write
    pub result: Result<(), StoreError>,
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Events in the order they happened
    pub events: Vec<PanelEvent, MAX_TICK_EVENTS>,
    /// Store write, if the preferences changed
    pub persisted: Option<Persisted>,
}

impl TickReport {
    /// Check if nothing happened
    pub fn is_idle(&self) -> bool {
        self.events.is_empty() && self.persisted.is_none()
    }

    fn push(&mut self, event: PanelEvent) {
        self.events.push(event).ok();
    }
}

/// Drive mode panel controller
pub struct PanelController<S: ByteStore, A: PressActuator> {
    config: PanelConfig,
    codec: StateCodec,
    store: S,
    actuator: A,
    preferences: PreferenceSet,
    mode_up: InputLatch,
    mode_down: InputLatch,
    idle_stop_go: InputLatch,
    secondary: SecondaryInput,
    dirty: bool,
}

impl<S: ByteStore, A: PressActuator> PanelController<S, A> {
    /// Create a controller
    ///
    /// Runs with the built-in default preferences until [`Self::boot`]
    /// loads the stored ones.
    pub fn new(config: PanelConfig, store: S, actuator: A) -> Self {
        Self {
            codec: StateCodec::new(config.variant),
            preferences: PreferenceSet::default_for(config.variant),
            secondary: SecondaryInput::for_variant(config.variant, config.gesture),
            mode_up: InputLatch::new(),
            mode_down: InputLatch::new(),
            idle_stop_go: InputLatch::new(),
            dirty: false,
            config,
            store,
            actuator,
        }
    }

    /// Power-on sequence
    ///
    /// Primes the outputs, loads the stored preferences (re-persisting the
    /// default if the stored byte is unusable), waits for the vehicle
    /// module to settle and replays the presses that bring it in sync.
    /// Blocks for the whole sequence.
    pub fn boot<D: DelayNs>(&mut self, delay: &mut D) -> BootReport {
        self.actuator.prime();

        let load = boot::load(&mut self.store, &self.codec);
        self.preferences = load.preferences;
        self.dirty = false;

        delay.delay_ms(self.config.startup_settle_ms);

        let plan = ReplayPlan::for_preferences(&self.preferences);
        plan.apply(&mut self.actuator);

        BootReport { load, plan }
    }

    /// Process one input sample
    ///
    /// `now_ms` must come from a monotonic clock. Correction presses block
    /// until they finish; inputs are not observed meanwhile.
    pub fn tick(&mut self, sample: InputSample, now_ms: u64) -> TickReport {
        let mut report = TickReport::default();

        if self.mode_up.sample(sample.mode_up) {
            let next = self.preferences.mode.increment();
            self.change_mode(next, &mut report);
        }

        if self.mode_down.sample(sample.mode_down) {
            let next = self.preferences.mode.decrement();
            self.change_mode(next, &mut report);
        }

        if self.idle_stop_go.sample(sample.idle_stop_go) {
            self.preferences.idle_stop_go = !self.preferences.idle_stop_go;
            self.dirty = true;
            report.push(PanelEvent::IdleStopGoToggled(self.preferences.idle_stop_go));
        }

        let current = self.preferences.secondary;
        if let Some(secondary) = self.secondary.sample(sample.secondary, now_ms, current) {
            self.preferences.secondary = secondary;
            self.dirty = true;
            report.push(PanelEvent::SecondaryChanged(secondary));
        }

        if self.dirty {
            report.persisted = Some(self.persist());
        }

        report
    }

    /// Pack the current preferences and write them
    ///
    /// Always writes, even if the byte is unchanged. Clears the dirty flag
    /// whatever the outcome; a failed write is retried only by the next
    /// change.
    pub fn persist(&mut self) -> Persisted {
        let byte = self.codec.pack(&self.preferences);
        let result = self.store.write_verified(byte);
        self.dirty = false;
        Persisted { byte, result }
    }

    fn change_mode(&mut self, next: DriveMode, report: &mut TickReport) {
        let current = self.preferences.mode;
        self.dirty = true;

        if next == current {
            report.push(PanelEvent::ModeSaturated(current));
            return;
        }

        self.preferences.mode = next;
        report.push(PanelEvent::ModeChanged {
            from: current,
            to: next,
        });

        // The module resets traction on every sport entry and exit
        if current.is_sport() != next.is_sport() {
            if let Some(kind) = self
                .preferences
                .secondary
                .traction()
                .and_then(|state| state.correction_press())
            {
                self.actuator.press_hold(kind);
                report.push(PanelEvent::TractionCorrected(kind));
            }
        }
    }

    /// Current preferences
    pub fn preferences(&self) -> &PreferenceSet {
        &self.preferences
    }

    /// Encoded form of the current preferences
    pub fn encoded(&self) -> u8 {
        self.codec.pack(&self.preferences)
    }

    /// Check if a change is waiting to be persisted
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Active configuration
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Access the press actuator
    pub fn actuator(&mut self) -> &mut A {
        &mut self.actuator
    }

    /// Access the byte store
    pub fn store(&mut self) -> &mut S {
        &mut self.store
    }
}
