//! Input decoding
//!
//! Raw input levels are sampled once per control loop tick. Each logical
//! input owns its own latch so a held button fires exactly once.

pub mod gesture;
pub mod latch;

pub use gesture::{AutoHoldToggle, HoldTimer, SecondaryGesture, SecondaryInput, TractionGesture};
pub use latch::InputLatch;
