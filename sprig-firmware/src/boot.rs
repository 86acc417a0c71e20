//! Boot-time configuration report
//!
//! Logs which subsystems may start and why the others may not. Secret
//! fields are never passed to the logger.

use defmt::*;

use sprig_core::config::{BootConfig, Subsystem, SubsystemConfig};
use sprig_core::diagnostic::DiagnosticScreen;

/// Log the validation result and return the number of ready subsystems
pub fn report(boot: &BootConfig) -> usize {
    let screen = DiagnosticScreen::from_boot(boot);
    for line in screen.lines().filter(|line| !line.is_empty()) {
        info!("| {=str}", line);
    }

    for fault in boot.faults() {
        error!("Config fault ({=str} group): {}", fault.group().label(), fault);
    }

    let mut ready = 0;
    for subsystem in Subsystem::ALL {
        match boot.subsystem(subsystem) {
            Ok(config) => {
                info!("{=str}: ready", subsystem.label());
                log_subsystem(&config);
                ready += 1;
            }
            Err(fault) => {
                warn!(
                    "{=str}: not started, {=str} is {=str}",
                    subsystem.label(),
                    fault.field().key(),
                    fault.reason()
                );
            }
        }
    }

    info!("{}/{} subsystems ready", ready, Subsystem::ALL.len());
    ready
}

/// Log the non-secret part of a subsystem's configuration
fn log_subsystem(config: &SubsystemConfig<'_>) {
    match config {
        SubsystemConfig::Wifi {
            credentials,
            timeouts,
        } => debug!(
            "  ssid={=str} auth={} connect_timeout={}ms",
            credentials.ssid(),
            credentials.requires_auth(),
            timeouts.wifi_connect_timeout_ms()
        ),
        SubsystemConfig::ApiClient { api, timeouts, .. } => debug!(
            "  channel={=str} request_timeout={}ms",
            api.channel_id(),
            timeouts.api_request_timeout_ms()
        ),
        SubsystemConfig::Bluetooth(identity) => debug!("  name={=str}", identity.name()),
        SubsystemConfig::Sensors(calibration) => debug!(
            "  temp_offset={} humidity_offset={} soil dry={} wet={}",
            calibration.temperature_offset(),
            calibration.humidity_offset(),
            calibration.soil_dry(),
            calibration.soil_wet()
        ),
        SubsystemConfig::Display(timeouts) => debug!(
            "  backlight={}ms menu={}ms",
            timeouts.backlight_timeout_ms(),
            timeouts.menu_timeout_ms()
        ),
    }
}
