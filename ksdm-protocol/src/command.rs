//! Command definitions and identity strings

/// Length of every command on the wire
pub const COMMAND_LEN: usize = 2;

// Wire format values
const CMD_IDENTIFY: [u8; COMMAND_LEN] = *b"id";

/// Commands accepted on the serial channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Report the firmware variant identity string
    Identify,
}

impl Command {
    /// Parse a command from its two wire bytes
    pub fn parse(bytes: [u8; COMMAND_LEN]) -> Option<Self> {
        match bytes {
            CMD_IDENTIFY => Some(Command::Identify),
            _ => None,
        }
    }

    /// Convert to wire format bytes
    pub fn to_bytes(self) -> [u8; COMMAND_LEN] {
        match self {
            Command::Identify => CMD_IDENTIFY,
        }
    }
}

/// Identity reported in reply to [`Command::Identify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Identity {
    /// Three-state traction panel (sport plus trim)
    SportPlus,
    /// Auto-hold panel (standard trim)
    Standard,
}

impl Identity {
    /// Identity string sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Identity::SportPlus => "ksdm3-rp2040-sportplus",
            Identity::Standard => "ksdm3-rp2040-3",
        }
    }

    /// Identity string as bytes
    pub fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identify() {
        assert_eq!(Command::parse(*b"id"), Some(Command::Identify));
        assert_eq!(Command::Identify.to_bytes(), *b"id");
    }

    #[test]
    fn test_parse_rejects_other_pairs() {
        assert_eq!(Command::parse(*b"ID"), None);
        assert_eq!(Command::parse(*b"di"), None);
        assert_eq!(Command::parse([0, 0]), None);
        assert_eq!(Command::parse(*b"i\n"), None);
    }

    #[test]
    fn test_identity_strings() {
        assert_eq!(Identity::SportPlus.as_str(), "ksdm3-rp2040-sportplus");
        assert_eq!(Identity::Standard.as_str(), "ksdm3-rp2040-3");
        assert_ne!(Identity::SportPlus.as_bytes(), Identity::Standard.as_bytes());
    }
}
