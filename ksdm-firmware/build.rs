//! Build script for ksdm-firmware
//!
//! - Validates panel.toml at compile time
//! - Generates the panel configuration constants
//! - Generates memory.x so the image stays below the preference sector

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// RP2040 flash size on the panel board
const FLASH_SIZE: u64 = 2 * 1024 * 1024;

/// Flash erase sector size
const SECTOR_SIZE: u64 = 4096;

/// Flash address as seen by the CPU
const XIP_BASE: u64 = 0x1000_0000;

/// Second-stage bootloader size at the start of flash
const BOOT2_SIZE: u64 = 0x100;

/// Smallest image region worth linking into
const MIN_IMAGE_SIZE: u64 = 64 * 1024;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PanelFile {
    panel: PanelSection,
    timing: TimingSection,
    gesture: GestureSection,
    storage: StorageSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PanelSection {
    variant: String,
    revision: u8,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimingSection {
    short_press_ms: u32,
    long_press_ms: u32,
    pulse_ms: u32,
    startup_settle_ms: u32,
    loop_tick_ms: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GestureSection {
    long_hold_ms: u64,
    reset_hold_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StorageSection {
    offset: u64,
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let panel = load_config();
    validate_config(&panel);

    write_panel_config(&out_dir, &panel);
    setup_linker(&out_dir, panel.storage.offset);

    println!("cargo:warning=panel.toml validated successfully");
}

/// Read and parse panel.toml
fn load_config() -> PanelFile {
    println!("cargo:rerun-if-changed=panel.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a panel.toml configuration file.          ║\n\
            ║  Please create one in the ksdm-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(panel) => panel,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid panel.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check value ranges and cross-field constraints
fn validate_config(panel: &PanelFile) {
    let mut errors = Vec::new();

    if !["sport_plus", "standard"].contains(&panel.panel.variant.as_str()) {
        errors.push(format!(
            "[panel] variant must be 'sport_plus' or 'standard', got '{}'",
            panel.panel.variant
        ));
    }

    let timing = &panel.timing;
    for (name, value) in [
        ("short_press_ms", timing.short_press_ms),
        ("long_press_ms", timing.long_press_ms),
        ("pulse_ms", timing.pulse_ms),
        ("loop_tick_ms", timing.loop_tick_ms),
    ] {
        if value == 0 {
            errors.push(format!("[timing] {} must be greater than 0", name));
        }
    }
    if timing.long_press_ms <= timing.short_press_ms {
        errors.push("[timing] long_press_ms must exceed short_press_ms".to_string());
    }
    if u64::from(timing.loop_tick_ms) >= panel.gesture.long_hold_ms {
        errors.push("[timing] loop_tick_ms must be shorter than long_hold_ms".to_string());
    }

    let gesture = &panel.gesture;
    if gesture.long_hold_ms == 0 {
        errors.push("[gesture] long_hold_ms must be greater than 0".to_string());
    }
    if gesture.reset_hold_ms <= gesture.long_hold_ms {
        errors.push("[gesture] reset_hold_ms must exceed long_hold_ms".to_string());
    }

    let offset = panel.storage.offset;
    if offset % SECTOR_SIZE != 0 {
        errors.push(format!(
            "[storage] offset 0x{:X} must be a multiple of 0x{:X}",
            offset, SECTOR_SIZE
        ));
    }
    if offset + SECTOR_SIZE > FLASH_SIZE {
        errors.push(format!(
            "[storage] offset 0x{:X} leaves no room for the sector in 2MB flash",
            offset
        ));
    }
    if offset < BOOT2_SIZE + MIN_IMAGE_SIZE {
        errors.push(format!(
            "[storage] offset 0x{:X} leaves less than 64K for the firmware",
            offset
        ));
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid panel configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Generate `panel_config.rs` for the firmware's config module
fn write_panel_config(out_dir: &Path, panel: &PanelFile) {
    let variant = match panel.panel.variant.as_str() {
        "standard" => "Variant::Standard",
        _ => "Variant::SportPlus",
    };

    let source = format!(
        "// Generated by build.rs from panel.toml\n\
         \n\
         /// Panel configuration\n\
         pub const PANEL_CONFIG: PanelConfig = PanelConfig {{\n    \
             variant: {variant},\n    \
             revision: HardwareRevision({revision}),\n    \
             press: PressTiming {{\n        \
                 short_press_ms: {short},\n        \
                 long_press_ms: {long},\n        \
                 pulse_ms: {pulse},\n    \
             }},\n    \
             gesture: GestureTiming {{\n        \
                 long_hold_ms: {long_hold},\n        \
                 reset_hold_ms: {reset_hold},\n    \
             }},\n    \
             startup_settle_ms: {settle},\n\
         }};\n\
         \n\
         /// Flash offset of the preference sector\n\
         pub const STORE_OFFSET: u32 = 0x{offset:X};\n\
         \n\
         /// Input polling period (ms)\n\
         pub const LOOP_TICK_MS: u64 = {tick};\n",
        variant = variant,
        revision = panel.panel.revision,
        short = panel.timing.short_press_ms,
        long = panel.timing.long_press_ms,
        pulse = panel.timing.pulse_ms,
        long_hold = panel.gesture.long_hold_ms,
        reset_hold = panel.gesture.reset_hold_ms,
        settle = panel.timing.startup_settle_ms,
        offset = panel.storage.offset,
        tick = panel.timing.loop_tick_ms,
    );

    fs::write(out_dir.join("panel_config.rs"), source).unwrap();
}

/// Generate memory.x and set up linker arguments
///
/// The FLASH region ends where the preference sector begins, so an image
/// that grows into it fails to link instead of being erased at runtime.
fn setup_linker(out_dir: &Path, store_offset: u64) {
    let image_size = store_offset - BOOT2_SIZE;

    let memory_x = format!(
        "MEMORY {{\n    \
             BOOT2 : ORIGIN = 0x10000000, LENGTH = 0x{boot2:X}\n    \
             FLASH : ORIGIN = 0x{flash:08X}, LENGTH = 0x{image:X}\n    \
             RAM   : ORIGIN = 0x20000000, LENGTH = 256K\n\
         }}\n\
         \n\
         EXTERNS(BOOT2_FIRMWARE)\n\
         \n\
         SECTIONS {{\n    \
             .boot2 ORIGIN(BOOT2) :\n    \
             {{\n        \
                 KEEP(*(.boot2));\n    \
             }} > BOOT2\n\
         }} INSERT BEFORE .text;\n",
        boot2 = BOOT2_SIZE,
        flash = XIP_BASE + BOOT2_SIZE,
        image = image_size,
    );

    fs::write(out_dir.join("memory.x"), memory_x).unwrap();
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Only the embedded target links with the cortex-m-rt scripts
    if env::var("TARGET").is_ok_and(|target| target.starts_with("thumb")) {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
