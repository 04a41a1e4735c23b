//! Persisted panel state
//!
//! The preference set is everything the panel remembers across power
//! cycles. It is stored as a single byte; see [`codec`].

pub mod codec;
pub mod mode;
pub mod preferences;
pub mod traction;

pub use codec::{CodecError, StateCodec, DEFAULT_BYTE};
pub use mode::DriveMode;
pub use preferences::{PreferenceSet, SecondaryState};
pub use traction::TractionState;
