//! Byte store on one NOR flash sector
//!
//! Only byte 0 of the sector is meaningful. Every write erases the whole
//! sector and programs one page, so writes are kept to real changes.

use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};
use ksdm_core::traits::{ByteStore, StoreError};

/// Program granularity used for the stored byte
pub const PAGE_SIZE: usize = 256;

/// Single-byte store in a dedicated flash sector
pub struct NorFlashByteStore<F> {
    flash: F,
    offset: u32,
}

impl<F: NorFlash> NorFlashByteStore<F> {
    /// Create a store at `offset`
    ///
    /// `offset` must be aligned to the flash erase size and lie outside the
    /// firmware image.
    pub fn new(flash: F, offset: u32) -> Self {
        Self { flash, offset }
    }

    /// Flash offset of the store sector
    pub fn offset(&self) -> u32 {
        self.offset
    }

    fn erase_and_program(&mut self, byte: u8) -> Result<(), F::Error> {
        let mut page = [0xFFu8; PAGE_SIZE];
        page[0] = byte;

        let start = self.offset;
        let end = start + F::ERASE_SIZE as u32;

        // Nothing else may run from flash while it is being rewritten
        critical_section::with(|_| {
            self.flash.erase(start, end)?;
            self.flash.write(start, &page)
        })
    }
}

impl<F: NorFlash> ByteStore for NorFlashByteStore<F> {
    fn read(&mut self) -> Result<u8, StoreError> {
        let mut buf = [0u8; 1];
        self.flash
            .read(self.offset, &mut buf)
            .map_err(|_| StoreError::Flash)?;
        Ok(buf[0])
    }

    fn write_verified(&mut self, byte: u8) -> Result<(), StoreError> {
        self.erase_and_program(byte).map_err(|_| StoreError::Flash)?;

        let found = self.read()?;
        if found != byte {
            return Err(StoreError::Verify {
                expected: byte,
                found,
            });
        }

        Ok(())
    }
}
