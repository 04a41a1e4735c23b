//! Flash layout for the preference store
//!
//! The store occupies one erase sector. The linker script keeps the
//! firmware image below it.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

/// Flash size on the panel board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Erase granularity
pub const SECTOR_SIZE: usize = ERASE_SIZE;

/// Blocking flash driver used by the byte store
pub type PanelFlash<'d> = Flash<'d, FLASH, Blocking, FLASH_SIZE>;

/// Create the blocking flash driver
pub fn panel_flash(flash: Peri<'_, FLASH>) -> PanelFlash<'_> {
    Flash::new_blocking(flash)
}

/// Check that a store offset is usable
pub const fn is_valid_store_offset(offset: u32) -> bool {
    (offset as usize) % SECTOR_SIZE == 0 && (offset as usize) + SECTOR_SIZE <= FLASH_SIZE
}
