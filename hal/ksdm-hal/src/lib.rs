//! KSDM Hardware Abstraction Layer
//!
//! This crate defines the chip-level traits the panel firmware is written
//! against. Chip-specific HALs implement them so the drivers and the
//! control logic can be tested on the host with mock pins and ports.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (ksdm-firmware)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ksdm-drivers (press emulator, store)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ksdm-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ ksdm-hal-     │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial command channel

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{ActiveLevel, InputPin, OutputPin};
pub use uart::{UartRx, UartTx};
