//! KSDM - Drive Mode Panel Emulator Firmware
//!
//! Main firmware binary for the RP2040 board that sits between the
//! drive-mode panel and the vehicle module. It remembers the driver's
//! drive mode, idle-stop-go and traction / auto-hold choices across power
//! cycles and replays the switch presses that restore them at every
//! start.
//!
//! Pin map:
//!
//! | GPIO | line                         |
//! |------|------------------------------|
//! | 0    | selector clockwise in        |
//! | 1    | selector counter-clockwise in|
//! | 2    | selector clockwise out       |
//! | 3    | selector counter-clockwise out|
//! | 4    | idle-stop-go in              |
//! | 5    | idle-stop-go out             |
//! | 6    | traction / auto-hold in      |
//! | 7    | traction / auto-hold out     |
//! | 16   | command UART TX              |
//! | 17   | command UART RX              |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ksdm_core::PanelController;
use ksdm_drivers::{CommandPort, GpioPressEmulator, NorFlashByteStore, PanelInputs, PressOutputs};
use ksdm_hal_rp2040::flash::{is_valid_store_offset, panel_flash};
use ksdm_hal_rp2040::{PanelInput, PanelOutput, SerialRx, SerialTx};

use crate::channels::PANEL_BYTE;
use crate::config::{PANEL_CONFIG, STORE_OFFSET};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Mirrors the offset check in build.rs
const _: () = assert!(is_valid_store_offset(STORE_OFFSET));

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("KSDM firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let revision = PANEL_CONFIG.revision;
    let hold_idle_high = revision.hold_active_level().level(false);
    let pulse_idle_high = revision.pulse_active_level().level(false);

    // Outputs start released so nothing is pressed before priming
    let outputs = PressOutputs {
        clockwise: PanelOutput::new(p.PIN_2, pulse_idle_high),
        counter_clockwise: PanelOutput::new(p.PIN_3, pulse_idle_high),
        idle_stop_go: PanelOutput::new(p.PIN_5, pulse_idle_high),
        hold: PanelOutput::new(p.PIN_7, hold_idle_high),
    };
    let emulator = GpioPressEmulator::new(outputs, Delay, PANEL_CONFIG.press, revision);

    let inputs = PanelInputs {
        mode_up: PanelInput::new(p.PIN_0),
        mode_down: PanelInput::new(p.PIN_1),
        idle_stop_go: PanelInput::new(p.PIN_4),
        secondary: PanelInput::new(p.PIN_6),
    };

    let store = NorFlashByteStore::new(panel_flash(p.FLASH), STORE_OFFSET);
    info!("Preference store at flash offset 0x{:X}", store.offset());

    // Command channel, 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_16, p.PIN_17, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let port = CommandPort::new(
        SerialRx::new(rx),
        SerialTx::new(tx),
        PANEL_CONFIG.variant.identity(),
    );
    info!("Command UART initialized");

    let panel = PanelController::new(PANEL_CONFIG, store, emulator);

    spawner.spawn(tasks::panel_task(panel, inputs, port)).unwrap();
    info!("Panel task spawned, firmware running");

    // Main task only reports the persisted state periodically
    let mut last_byte = None;
    loop {
        match select(PANEL_BYTE.wait(), Timer::after_secs(60)).await {
            Either::First(byte) => last_byte = Some(byte),
            Either::Second(()) => match last_byte {
                Some(byte) => trace!("Heartbeat, preferences 0x{:02X}", byte),
                None => trace!("Heartbeat"),
            },
        }
    }
}
