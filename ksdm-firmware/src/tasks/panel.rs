//! Panel control task
//!
//! Boots the controller, then polls the command port and the panel inputs
//! once per tick. Presses block the executor while they run; nothing else
//! time-critical shares it.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::{Delay, Duration, Instant, Ticker};

use ksdm_core::boot::{BootReport, LoadSource};
use ksdm_core::controller::Persisted;
use ksdm_core::{PanelController, PanelEvent, TickReport};
use ksdm_drivers::{CommandPort, GpioPressEmulator, NorFlashByteStore, PanelInputs};
use ksdm_hal_rp2040::{PanelFlash, PanelInput, PanelOutput, SerialRx, SerialTx};

use crate::channels::PANEL_BYTE;
use crate::config::LOOP_TICK_MS;

/// Controller wired to the RP2040 outputs and flash
pub type Panel = PanelController<
    NorFlashByteStore<PanelFlash<'static>>,
    GpioPressEmulator<PanelOutput<'static>, Delay>,
>;

/// Identification command port on the buffered UART
pub type PanelPort = CommandPort<SerialRx<BufferedUartRx>, SerialTx<BufferedUartTx>>;

/// Panel task - boot reconciliation followed by the polling loop
#[embassy_executor::task]
pub async fn panel_task(
    mut panel: Panel,
    inputs: PanelInputs<PanelInput<'static>>,
    mut port: PanelPort,
) {
    info!("Panel task started, variant {:?}", panel.config().variant);

    let report = panel.boot(&mut Delay);
    log_boot(&report);
    PANEL_BYTE.signal(panel.encoded());

    let mut ticker = Ticker::every(Duration::from_millis(LOOP_TICK_MS));

    loop {
        match port.poll() {
            Ok(Some(command)) => debug!("Answered {:?}", command),
            Ok(None) => {}
            Err(_) => warn!("Command port error"),
        }

        let sample = inputs.sample();
        let report = panel.tick(sample, Instant::now().as_millis());
        if !report.is_idle() {
            log_tick(&report);
        }

        ticker.next().await;
    }
}

fn log_boot(report: &BootReport) {
    match report.load.source {
        LoadSource::Stored(byte) => info!("Loaded preferences 0x{:02X}", byte),
        LoadSource::Default(reason) => {
            warn!("Stored preferences rejected: {:?}, using defaults", reason);
            match report.load.repersisted {
                Some(Ok(())) => info!("Default preferences written back"),
                Some(Err(e)) => warn!("Failed to write default preferences: {:?}", e),
                None => {}
            }
        }
    }

    info!("Preferences: {:?}", report.load.preferences);
    info!("Replayed: {:?}", report.plan);

    if report.plan.is_ambiguous() {
        debug!("Selector position is shared by eco and comfort");
    }
}

fn log_tick(report: &TickReport) {
    for event in &report.events {
        match event {
            PanelEvent::ModeChanged { from, to } => info!("Mode {:?} -> {:?}", from, to),
            PanelEvent::ModeSaturated(mode) => debug!("Mode input saturated at {:?}", mode),
            PanelEvent::TractionCorrected(kind) => info!("Traction re-asserted ({:?})", kind),
            PanelEvent::IdleStopGoToggled(enabled) => info!("Idle-stop-go: {}", enabled),
            PanelEvent::SecondaryChanged(state) => info!("Secondary: {:?}", state),
        }
    }

    match report.persisted {
        Some(Persisted { byte, result: Ok(()) }) => {
            trace!("Persisted 0x{:02X}", byte);
            PANEL_BYTE.signal(byte);
        }
        Some(Persisted {
            byte,
            result: Err(e),
        }) => warn!("Failed to persist 0x{:02X}: {:?}", byte, e),
        None => {}
    }
}
