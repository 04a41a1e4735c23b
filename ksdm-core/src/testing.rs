//! Host-side doubles shared by the unit tests

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::traits::{ByteStore, Direction, PressActuator, PressKind, StoreError};

/// Byte store backed by a field
pub struct MemoryStore {
    pub byte: u8,
    pub writes: Vec<u8, 16>,
    pub fail_read: bool,
    pub fail_write: Option<StoreError>,
}

impl MemoryStore {
    pub fn holding(byte: u8) -> Self {
        Self {
            byte,
            writes: Vec::new(),
            fail_read: false,
            fail_write: None,
        }
    }

    pub fn erased() -> Self {
        Self::holding(0xFF)
    }
}

impl ByteStore for MemoryStore {
    fn read(&mut self) -> Result<u8, StoreError> {
        if self.fail_read {
            return Err(StoreError::Flash);
        }
        Ok(self.byte)
    }

    fn write_verified(&mut self, byte: u8) -> Result<(), StoreError> {
        self.writes.push(byte).ok();
        if let Some(err) = self.fail_write {
            return Err(err);
        }
        self.byte = byte;
        Ok(())
    }
}

/// One recorded actuation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Prime,
    Hold(PressKind),
    IdleStopGo,
    Pulse(Direction, u8),
}

/// Actuator that records what it was asked to do
#[derive(Default)]
pub struct RecordingActuator {
    pub actions: Vec<Action, 32>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

impl PressActuator for RecordingActuator {
    fn prime(&mut self) {
        self.actions.push(Action::Prime).ok();
    }

    fn press_hold(&mut self, kind: PressKind) {
        self.actions.push(Action::Hold(kind)).ok();
    }

    fn toggle_idle_stop_go(&mut self) {
        self.actions.push(Action::IdleStopGo).ok();
    }

    fn pulse(&mut self, direction: Direction, times: u8) {
        self.actions.push(Action::Pulse(direction, times)).ok();
    }
}

/// Delay that only counts elapsed time
#[derive(Default)]
pub struct VirtualDelay {
    pub elapsed_ns: u64,
}

impl VirtualDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for VirtualDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}
