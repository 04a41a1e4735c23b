//! KSDM Serial Command Channel
//!
//! The panel exposes a minimal serial channel used by service tools to tell
//! which firmware variant is flashed on a board.
//!
//! # Protocol Overview
//!
//! Commands are exactly two ASCII bytes. Whatever else arrives in the same
//! burst is dropped:
//! ```text
//! ┌────────┬──────────────────────────┐
//! │ CMD    │ TRAILING (discarded)     │
//! │ 2B     │ 0–N B                    │
//! └────────┴──────────────────────────┘
//! ```
//!
//! The only command is `id`, answered with the variant identity string
//! and no terminator. Unknown commands get no reply.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod reader;

pub use command::{Command, Identity, COMMAND_LEN};
pub use reader::CommandReader;
