//! UI and network timing thresholds

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::error::ConfigError;
use super::types::{DeviceSource, Field};

/// Display inactivity timeouts
///
/// A value of 0 disables the corresponding timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct UiTimeouts {
    backlight_ms: u32,
    menu_ms: u32,
}

impl UiTimeouts {
    pub(crate) fn from_source(source: &DeviceSource<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            backlight_ms: non_negative(Field::BacklightTimeout, source.backlight_timeout_ms)?,
            menu_ms: non_negative(Field::MenuTimeout, source.menu_timeout_ms)?,
        })
    }

    /// Backlight auto-off delay in ms (0 = always on)
    pub fn backlight_timeout_ms(&self) -> u32 {
        self.backlight_ms
    }

    /// Return-to-home delay in ms (0 = stay on the current menu)
    pub fn menu_timeout_ms(&self) -> u32 {
        self.menu_ms
    }

    /// Whether the backlight should be off after `idle_ms` without input
    pub fn backlight_expired(&self, idle_ms: u32) -> bool {
        self.backlight_ms != 0 && idle_ms >= self.backlight_ms
    }

    /// Whether the menu should return home after `idle_ms` without input
    pub fn menu_expired(&self, idle_ms: u32) -> bool {
        self.menu_ms != 0 && idle_ms >= self.menu_ms
    }
}

/// Network operation bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NetworkTimeouts {
    wifi_connect_ms: u32,
    api_request_ms: u32,
}

impl NetworkTimeouts {
    pub(crate) fn from_source(source: &DeviceSource<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            wifi_connect_ms: positive(Field::WifiConnectTimeout, source.wifi_connect_timeout_ms)?,
            api_request_ms: positive(Field::ApiRequestTimeout, source.api_request_timeout_ms)?,
        })
    }

    /// WiFi connection timeout in ms
    pub fn wifi_connect_timeout_ms(&self) -> u32 {
        self.wifi_connect_ms
    }

    /// API request timeout in ms
    pub fn api_request_timeout_ms(&self) -> u32 {
        self.api_request_ms
    }

    /// WiFi connection timeout
    pub fn wifi_connect(&self) -> Duration {
        Duration::from_millis(u64::from(self.wifi_connect_ms))
    }

    /// API request timeout
    pub fn api_request(&self) -> Duration {
        Duration::from_millis(u64::from(self.api_request_ms))
    }
}

fn non_negative(field: Field, value: i32) -> Result<u32, ConfigError> {
    u32::try_from(value).map_err(|_| ConfigError::InvalidTimeout { field, value })
}

fn positive(field: Field, value: i32) -> Result<u32, ConfigError> {
    match non_negative(field, value)? {
        0 => Err(ConfigError::InvalidTimeout { field, value }),
        ms => Ok(ms),
    }
}
