//! Byte store implementations

pub mod nor_flash;

pub use nor_flash::{NorFlashByteStore, PAGE_SIZE};
