//! Burst-oriented command reader
//!
//! The host writes a command and may follow it with a line ending or other
//! noise. The reader takes the first two bytes of each burst as the command
//! and throws the rest of that burst away. A lone byte is held until the
//! next burst supplies its partner.

use crate::command::Command;

/// Reassembles two-byte commands from receive bursts
#[derive(Debug, Clone, Default)]
pub struct CommandReader {
    /// First half of a command whose second byte has not arrived yet
    pending: Option<u8>,
}

impl CommandReader {
    /// Create a new command reader
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Reset the reader, dropping any half-received command
    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Check if a half-received command is waiting for its second byte
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed one receive burst
    ///
    /// Returns the command if the burst completed a recognised one.
    /// Completed but unrecognised pairs are dropped silently.
    pub fn feed_burst(&mut self, burst: &[u8]) -> Option<Command> {
        let (&head, tail) = burst.split_first()?;

        let (first, second) = match self.pending.take() {
            Some(first) => (first, Some(head)),
            None => (head, tail.first().copied()),
        };

        match second {
            Some(second) => Command::parse([first, second]),
            None => {
                self.pending = Some(first);
                None
            }
        }
    }
}
