//! Serial adapters for the command channel
//!
//! Wrap the halves of an embassy-rp `BufferedUart` (or anything else
//! speaking blocking `embedded-io`) so the control loop can poll them
//! without ever waiting for input.

use embedded_io::{Read, ReadReady, Write};

/// Receive half adapter
pub struct SerialRx<R> {
    inner: R,
}

impl<R> SerialRx<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read + ReadReady> ksdm_hal::UartRx for SerialRx<R> {
    type Error = R::Error;

    fn is_readable(&mut self) -> Result<bool, Self::Error> {
        self.inner.read_ready()
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        // `read` would block on an empty buffer
        if buf.is_empty() || !self.inner.read_ready()? {
            return Ok(0);
        }
        self.inner.read(buf)
    }
}

/// Transmit half adapter
pub struct SerialTx<T> {
    inner: T,
}

impl<T> SerialTx<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: Write> ksdm_hal::UartTx for SerialTx<T> {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}
