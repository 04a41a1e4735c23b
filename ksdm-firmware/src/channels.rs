//! Inter-task signals

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Latest persisted preference byte, published by the panel task
pub static PANEL_BYTE: Signal<CriticalSectionRawMutex, u8> = Signal::new();
