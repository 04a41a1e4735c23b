//! Command port
//!
//! Services the identification command on the serial channel. Polled once
//! per control loop tick; never waits for bytes.

use ksdm_hal::{UartRx, UartTx};
use ksdm_protocol::{Command, CommandReader, Identity};

/// Bytes pulled from the receiver per read
pub const RX_CHUNK: usize = 32;

/// Command port errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError<RE, TE> {
    /// Receive side failed
    Rx(RE),
    /// Transmit side failed
    Tx(TE),
}

/// Identification command handler over a UART
pub struct CommandPort<R, T> {
    rx: R,
    tx: T,
    reader: CommandReader,
    identity: Identity,
}

impl<R: UartRx, T: UartTx> CommandPort<R, T> {
    /// Create a port answering with `identity`
    pub fn new(rx: R, tx: T, identity: Identity) -> Self {
        Self {
            rx,
            tx,
            reader: CommandReader::new(),
            identity,
        }
    }

    /// Identity sent in reply to [`Command::Identify`]
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Handle whatever has arrived since the last poll
    ///
    /// Returns the command that was answered, if any.
    pub fn poll(&mut self) -> Result<Option<Command>, PortError<R::Error, T::Error>> {
        if !self.rx.is_readable().map_err(PortError::Rx)? {
            return Ok(None);
        }

        let mut buf = [0u8; RX_CHUNK];
        let len = self.rx.read_available(&mut buf).map_err(PortError::Rx)?;
        let command = self.reader.feed_burst(&buf[..len]);
        self.discard_rest().map_err(PortError::Rx)?;

        match command {
            Some(command) => {
                self.respond(command).map_err(PortError::Tx)?;
                Ok(Some(command))
            }
            None => Ok(None),
        }
    }

    /// Drop the tail of a burst longer than one read
    fn discard_rest(&mut self) -> Result<(), R::Error> {
        let mut scratch = [0u8; RX_CHUNK];
        while self.rx.is_readable()? {
            if self.rx.read_available(&mut scratch)? == 0 {
                break;
            }
        }
        Ok(())
    }

    fn respond(&mut self, command: Command) -> Result<(), T::Error> {
        match command {
            Command::Identify => self.tx.write_blocking(self.identity.as_bytes())?,
        }
        self.tx.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Receive FIFO; bytes stay queued until read
    #[derive(Default)]
    struct MockRx {
        fifo: VecDeque<u8>,
    }

    impl MockRx {
        fn receive(&mut self, burst: &[u8]) {
            self.fifo.extend(burst);
        }
    }

    impl UartRx for MockRx {
        type Error = ();

        fn is_readable(&mut self) -> Result<bool, ()> {
            Ok(!self.fifo.is_empty())
        }

        fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            let len = self.fifo.len().min(buf.len());
            for (slot, byte) in buf.iter_mut().zip(self.fifo.drain(..len)) {
                *slot = byte;
            }
            Ok(len)
        }
    }

    #[derive(Default)]
    struct MockTx {
        sent: Vec<u8>,
        fail: bool,
    }

    impl UartTx for MockTx {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.sent.extend_from_slice(data);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    fn port(identity: Identity) -> CommandPort<MockRx, MockTx> {
        CommandPort::new(MockRx::default(), MockTx::default(), identity)
    }

    #[test]
    fn test_identify_sport_plus() {
        let mut port = port(Identity::SportPlus);
        port.rx.receive(b"id\n");
        assert_eq!(port.poll(), Ok(Some(Command::Identify)));
        assert_eq!(port.tx.sent, b"ksdm3-rp2040-sportplus");
    }

    #[test]
    fn test_identify_standard_split() {
        let mut port = port(Identity::Standard);
        port.rx.receive(b"i");
        assert_eq!(port.poll(), Ok(None));
        port.rx.receive(b"d");
        assert_eq!(port.poll(), Ok(Some(Command::Identify)));
        assert_eq!(port.tx.sent, b"ksdm3-rp2040-3");
    }

    #[test]
    fn test_nothing_received() {
        let mut port = port(Identity::SportPlus);
        assert_eq!(port.poll(), Ok(None));
        assert!(port.tx.sent.is_empty());
    }

    #[test]
    fn test_unknown_command_ignored() {
        let mut port = port(Identity::SportPlus);
        port.rx.receive(b"hi");
        assert_eq!(port.poll(), Ok(None));
        assert!(port.tx.sent.is_empty());
    }

    #[test]
    fn test_long_burst_tail_discarded() {
        let mut burst = b"hi".to_vec();
        burst.extend_from_slice(&[b'x'; 30]);
        burst.extend_from_slice(b"id");
        assert_eq!(burst.len(), 34);

        let mut port = port(Identity::SportPlus);
        port.rx.receive(&burst);
        assert_eq!(port.poll(), Ok(None));
        assert!(port.rx.fifo.is_empty());
        assert_eq!(port.poll(), Ok(None));
        assert!(port.tx.sent.is_empty());
    }

    #[test]
    fn test_long_burst_answers_leading_command() {
        let mut burst = b"id".to_vec();
        burst.extend_from_slice(&[b'x'; 70]);

        let mut port = port(Identity::Standard);
        port.rx.receive(&burst);
        assert_eq!(port.poll(), Ok(Some(Command::Identify)));
        assert!(port.rx.fifo.is_empty());
        assert_eq!(port.poll(), Ok(None));
        assert_eq!(port.tx.sent, b"ksdm3-rp2040-3");
    }

    #[test]
    fn test_tx_failure() {
        let mut port = port(Identity::SportPlus);
        port.rx.receive(b"id");
        port.tx.fail = true;
        assert_eq!(port.poll(), Err(PortError::Tx(())));
    }
}
