//! Persistent byte storage trait

/// Errors from byte store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying flash operation failed
    Flash,
    /// Read-back after programming did not match
    Verify {
        /// Byte that was programmed
        expected: u8,
        /// Byte read back
        found: u8,
    },
}

/// Single-byte non-volatile storage
///
/// The store survives power loss but has limited erase endurance, so
/// callers write only when something actually happened.
pub trait ByteStore {
    /// Read the stored byte
    ///
    /// Returns whatever the medium holds, which is implementation-defined
    /// garbage if the byte was never written.
    fn read(&mut self) -> Result<u8, StoreError>;

    /// Replace the stored byte and verify it by reading it back
    fn write_verified(&mut self, byte: u8) -> Result<(), StoreError>;
}
