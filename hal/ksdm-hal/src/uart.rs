//! UART serial communication abstractions
//!
//! The command channel is serviced from inside the control loop, so the
//! receive side never blocks: it hands over whatever bytes are already
//! buffered and returns.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Check whether at least one received byte is waiting
    fn is_readable(&mut self) -> Result<bool, Self::Error>;

    /// Read already-received bytes into `buf` without waiting
    ///
    /// Returns the number of bytes copied, which is 0 when nothing is
    /// buffered.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}
