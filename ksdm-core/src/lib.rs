//! Board-agnostic core logic for the drive mode panel firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Persisted preference set and its single-byte encoding
//! - Input latches and the secondary-button gestures
//! - Drive mode cycling
//! - Boot-time reconciliation of the vehicle module with stored state
//! - The polling control loop
//! - Device-level traits (press actuator, byte store)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod boot;
pub mod config;
pub mod controller;
pub mod input;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{InputSample, PanelController, PanelEvent, TickReport};
