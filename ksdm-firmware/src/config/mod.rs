//! Build-time panel configuration
//!
//! `build.rs` validates `panel.toml` and generates the constants below.

use ksdm_core::config::{GestureTiming, HardwareRevision, PanelConfig, PressTiming, Variant};

include!(concat!(env!("OUT_DIR"), "/panel_config.rs"));
