//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in ksdm-core on top of the ksdm-hal pin and port traits:
//!
//! - Press emulator (GPIO outputs standing in for the factory switches)
//! - Byte store (one sector of NOR flash)
//! - Panel input sampler
//! - Command port (identification over UART)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod input;
pub mod press;
pub mod storage;

pub use command::{CommandPort, PortError};
pub use input::PanelInputs;
pub use press::{GpioPressEmulator, PressOutputs};
pub use storage::NorFlashByteStore;
