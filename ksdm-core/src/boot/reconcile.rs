//! Stored state loading and press replay

use crate::state::{CodecError, DriveMode, PreferenceSet, SecondaryState, StateCodec, DEFAULT_BYTE};
use crate::traits::{ByteStore, Direction, PressActuator, PressKind, StoreError};

/// Why the stored byte was not used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FallbackReason {
    /// The store could not be read
    ReadFailed(StoreError),
    /// Byte outside the range the codec produces (erased or garbage)
    Implausible(u8),
    /// Byte in range but with a field value that has no meaning
    Undecodable {
        /// Stored byte
        byte: u8,
        /// Offending field
        error: CodecError,
    },
}

/// Where the boot preferences came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadSource {
    /// Decoded from the stored byte
    Stored(u8),
    /// Built-in default, stored byte rejected
    Default(FallbackReason),
}

/// Result of [`load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadOutcome {
    /// Preferences to run with
    pub preferences: PreferenceSet,
    /// Where they came from
    pub source: LoadSource,
    /// Result of writing the default back, if a fallback happened
    pub repersisted: Option<Result<(), StoreError>>,
}

/// Load the stored preferences, falling back to the default
///
/// On fallback the default byte is written back immediately so the next
/// boot finds a valid byte. A failed write-back is reported, not retried.
pub fn load<S: ByteStore>(store: &mut S, codec: &StateCodec) -> LoadOutcome {
    let stored = store
        .read()
        .map_err(FallbackReason::ReadFailed)
        .and_then(|byte| {
            if !StateCodec::is_plausible(byte) {
                return Err(FallbackReason::Implausible(byte));
            }
            codec
                .unpack(byte)
                .map(|prefs| (byte, prefs))
                .map_err(|error| FallbackReason::Undecodable { byte, error })
        });

    match stored {
        Ok((byte, preferences)) => LoadOutcome {
            preferences,
            source: LoadSource::Stored(byte),
            repersisted: None,
        },
        Err(reason) => LoadOutcome {
            preferences: PreferenceSet::default_for(codec.variant()),
            source: LoadSource::Default(reason),
            repersisted: Some(store.write_verified(DEFAULT_BYTE)),
        },
    }
}

/// Presses that bring the vehicle module from its power-on defaults to a
/// preference set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReplayPlan {
    /// Hold-button press for the secondary setting
    pub secondary: Option<PressKind>,
    /// Idle-stop-go needs switching off
    pub toggle_idle_stop_go: bool,
    /// Selector detents from the module's default position
    pub selector: Option<(Direction, u8)>,
    /// Mode the plan was built for
    pub mode: DriveMode,
}

impl ReplayPlan {
    /// Build the plan for a preference set
    pub fn for_preferences(prefs: &PreferenceSet) -> Self {
        let secondary = match prefs.secondary {
            // The module only honours traction presses while in sport mode
            SecondaryState::Traction(state) if prefs.mode.is_sport() => state.correction_press(),
            SecondaryState::Traction(_) => None,
            SecondaryState::AutoHold(true) => Some(PressKind::Short),
            SecondaryState::AutoHold(false) => None,
        };

        Self {
            secondary,
            toggle_idle_stop_go: !prefs.idle_stop_go,
            selector: Self::selector_pulses(prefs.mode),
            mode: prefs.mode,
        }
    }

    /// Detents from the selector's power-on position to `mode`
    ///
    /// Eco and comfort both need no movement, so the module cannot tell
    /// them apart after a reboot.
    pub fn selector_pulses(mode: DriveMode) -> Option<(Direction, u8)> {
        match mode {
            DriveMode::Sport => Some((Direction::Clockwise, 1)),
            DriveMode::Custom => Some((Direction::Clockwise, 2)),
            DriveMode::Smart => Some((Direction::CounterClockwise, 2)),
            DriveMode::Eco | DriveMode::Comfort => None,
        }
    }

    /// Check if the module ends up in a position shared by two modes
    pub fn is_ambiguous(&self) -> bool {
        matches!(self.mode, DriveMode::Eco | DriveMode::Comfort)
    }

    /// Check if the plan presses anything at all
    pub fn is_empty(&self) -> bool {
        self.secondary.is_none() && !self.toggle_idle_stop_go && self.selector.is_none()
    }

    /// Run the plan: secondary, then idle-stop-go, then selector
    pub fn apply<A: PressActuator>(&self, actuator: &mut A) {
        if let Some(kind) = self.secondary {
            actuator.press_hold(kind);
        }

        if self.toggle_idle_stop_go {
            actuator.toggle_idle_stop_go();
        }

        if let Some((direction, times)) = self.selector {
            actuator.pulse(direction, times);
        }
    }
}

/// Everything that happened during boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootReport {
    /// Loaded preferences and their source
    pub load: LoadOutcome,
    /// Presses that were replayed
    pub plan: ReplayPlan,
}
