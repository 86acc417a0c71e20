//! Sprig - Environmental Dashboard Firmware
//!
//! Main firmware binary for RP2040-based dashboards. Validates the
//! compiled-in device configuration before any subsystem starts and
//! keeps running in degraded mode when only some groups are valid.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sprig_core::config::{BootConfig, ConfigurationStore};

mod boot;
mod config;

// Configuration must live forever for task references
static BOOT_CONFIG: StaticCell<BootConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Sprig firmware starting...");

    let _p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let boot: &'static BootConfig =
        BOOT_CONFIG.init(ConfigurationStore::load(&config::DEVICE_SOURCE));

    if boot::report(boot) == 0 {
        error!("No subsystem can start, fix device.toml and rebuild");
    }

    loop {
        Timer::after_secs(60).await;
    }
}
