//! Device-level traits
//!
//! These traits define the interface between the panel logic and the
//! hardware-specific implementations in `ksdm-drivers`.

pub mod actuator;
pub mod storage;

pub use actuator::{Direction, PressActuator, PressKind};
pub use storage::{ByteStore, StoreError};
