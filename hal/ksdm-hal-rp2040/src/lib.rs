//! RP2040-specific HAL for the panel firmware
//!
//! This crate provides RP2040 implementations of the shared `ksdm-hal`
//! traits on top of embassy-rp:
//!
//! - GPIO wrappers for the panel inputs and simulated switch outputs
//! - Serial adapters for the buffered UART command channel
//! - Flash partition layout for the preference store

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod uart;

pub use flash::{PanelFlash, FLASH_SIZE};
pub use gpio::{PanelInput, PanelOutput};
pub use uart::{SerialRx, SerialTx};
