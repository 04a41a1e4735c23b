//! Press emulator implementations

pub mod gpio;

pub use gpio::{GpioPressEmulator, PressOutputs};
