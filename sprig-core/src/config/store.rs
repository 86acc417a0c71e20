//! Configuration store
//!
//! [`ConfigurationStore::load`] validates every group on its own and
//! never fails, so subsystems whose groups are valid can start even when
//! another group is misconfigured. [`ConfigurationStore::new`] is the
//! strict form: all groups valid, or the highest-priority error.
//!
//! Neither type exposes a mutable view once built.

#[cfg(feature = "serde")]
use serde::Serialize;

use super::calibration::SensorCalibration;
use super::credentials::{ApiCredentials, BluetoothIdentity, NetworkCredentials};
use super::error::ConfigError;
use super::timing::{NetworkTimeouts, UiTimeouts};
use super::types::{DeviceSource, Subsystem};

/// Fully validated device configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationStore {
    network: NetworkCredentials,
    api: ApiCredentials,
    bluetooth: BluetoothIdentity,
    calibration: SensorCalibration,
    ui: UiTimeouts,
    timeouts: NetworkTimeouts,
}

impl ConfigurationStore {
    /// Validate a source, requiring every group to be valid
    pub fn new(source: &DeviceSource<'_>) -> Result<Self, ConfigError> {
        Self::load(source).into_store()
    }

    /// Validate a source group by group
    pub fn load(source: &DeviceSource<'_>) -> BootConfig {
        BootConfig {
            network: NetworkCredentials::from_source(source),
            api: ApiCredentials::from_source(source),
            bluetooth: BluetoothIdentity::from_source(source),
            calibration: SensorCalibration::from_source(source),
            ui: UiTimeouts::from_source(source),
            timeouts: NetworkTimeouts::from_source(source),
        }
    }

    /// WiFi SSID and password
    pub fn network_credentials(&self) -> &NetworkCredentials {
        &self.network
    }

    /// API key and channel identifier
    pub fn api_credentials(&self) -> &ApiCredentials {
        &self.api
    }

    /// Advertised Bluetooth name
    pub fn bluetooth_device_name(&self) -> &str {
        self.bluetooth.name()
    }

    /// Offsets and soil references
    pub fn sensor_calibration(&self) -> &SensorCalibration {
        &self.calibration
    }

    /// Backlight and menu timeouts
    pub fn ui_timeouts(&self) -> UiTimeouts {
        self.ui
    }

    /// WiFi connect and API request timeouts
    pub fn network_timeouts(&self) -> NetworkTimeouts {
        self.timeouts
    }

    /// Everything except the secrets, for export and diagnostics
    #[cfg(feature = "serde")]
    pub fn public_snapshot(&self) -> PublicSnapshot<'_> {
        PublicSnapshot {
            ssid: self.network.ssid(),
            channel_id: self.api.channel_id(),
            bluetooth_name: self.bluetooth.name(),
            calibration: self.calibration,
            ui: self.ui,
            network: self.timeouts,
        }
    }
}

/// Secret-free view of a [`ConfigurationStore`]
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PublicSnapshot<'a> {
    pub ssid: &'a str,
    pub channel_id: &'a str,
    pub bluetooth_name: &'a str,
    pub calibration: SensorCalibration,
    pub ui: UiTimeouts,
    pub network: NetworkTimeouts,
}

/// Configuration handed to a single subsystem
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubsystemConfig<'a> {
    Wifi {
        credentials: &'a NetworkCredentials,
        timeouts: NetworkTimeouts,
    },
    ApiClient {
        network: &'a NetworkCredentials,
        api: &'a ApiCredentials,
        timeouts: NetworkTimeouts,
    },
    Bluetooth(&'a BluetoothIdentity),
    Sensors(&'a SensorCalibration),
    Display(UiTimeouts),
}

/// Per-group validation result produced at boot
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootConfig {
    network: Result<NetworkCredentials, ConfigError>,
    api: Result<ApiCredentials, ConfigError>,
    bluetooth: Result<BluetoothIdentity, ConfigError>,
    calibration: Result<SensorCalibration, ConfigError>,
    ui: Result<UiTimeouts, ConfigError>,
    timeouts: Result<NetworkTimeouts, ConfigError>,
}

impl BootConfig {
    /// Configuration for one subsystem, or the first fault among its groups
    pub fn subsystem(&self, subsystem: Subsystem) -> Result<SubsystemConfig<'_>, ConfigError> {
        let config = match subsystem {
            Subsystem::Wifi => SubsystemConfig::Wifi {
                credentials: group(&self.network)?,
                timeouts: *group(&self.timeouts)?,
            },
            Subsystem::ApiClient => SubsystemConfig::ApiClient {
                network: group(&self.network)?,
                api: group(&self.api)?,
                timeouts: *group(&self.timeouts)?,
            },
            Subsystem::Bluetooth => SubsystemConfig::Bluetooth(group(&self.bluetooth)?),
            Subsystem::Sensors => SubsystemConfig::Sensors(group(&self.calibration)?),
            Subsystem::Display => SubsystemConfig::Display(*group(&self.ui)?),
        };
        Ok(config)
    }

    /// Whether a subsystem may start
    pub fn is_ready(&self, subsystem: Subsystem) -> bool {
        self.subsystem(subsystem).is_ok()
    }

    /// Every fault, in group order
    pub fn faults(&self) -> impl Iterator<Item = ConfigError> + '_ {
        [
            self.network.as_ref().err(),
            self.api.as_ref().err(),
            self.bluetooth.as_ref().err(),
            self.calibration.as_ref().err(),
            self.ui.as_ref().err(),
            self.timeouts.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .copied()
    }

    /// The fault that would be reported if only one could be
    pub fn first_fault(&self) -> Option<ConfigError> {
        self.faults().min_by_key(ConfigError::priority)
    }

    /// Whether every group is valid
    pub fn is_complete(&self) -> bool {
        self.faults().next().is_none()
    }

    /// Convert into the strict store
    pub fn into_store(self) -> Result<ConfigurationStore, ConfigError> {
        if let Some(fault) = self.first_fault() {
            return Err(fault);
        }

        Ok(ConfigurationStore {
            network: self.network?,
            api: self.api?,
            bluetooth: self.bluetooth?,
            calibration: self.calibration?,
            ui: self.ui?,
            timeouts: self.timeouts?,
        })
    }
}

fn group<T>(slot: &Result<T, ConfigError>) -> Result<&T, ConfigError> {
    slot.as_ref().map_err(|e| *e)
}
