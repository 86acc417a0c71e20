//! Configuration type definitions
//!
//! These types describe what the deployer supplies before build time and
//! how the fields are partitioned among the subsystems that read them.

use core::fmt;

/// Maximum SSID length (802.11 limit)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximum API key length
pub const MAX_API_KEY_LEN: usize = 64;

/// Maximum channel identifier length
pub const MAX_CHANNEL_ID_LEN: usize = 32;

/// Maximum Bluetooth device name length
pub const MAX_DEVICE_NAME_LEN: usize = 32;

/// Highest reading of the 12-bit soil sensor ADC
pub const ADC_MAX: u16 = 4095;

/// Sentinel left in the template for the WiFi SSID
pub const SSID_PLACEHOLDER: &str = "YOUR_WIFI_SSID";

/// Sentinel left in the template for the WiFi password
pub const PASSWORD_PLACEHOLDER: &str = "YOUR_WIFI_PASSWORD";

/// Sentinel left in the template for the API key
pub const API_KEY_PLACEHOLDER: &str = "YOUR_YOUTUBE_API_KEY";

/// Sentinel left in the template for the channel identifier
pub const CHANNEL_ID_PLACEHOLDER: &str = "YOUR_CHANNEL_ID";

/// Bluetooth name used when the deployer does not set one
pub const DEFAULT_BLUETOOTH_NAME: &str = "ESP32_Dashboard";

/// Raw configuration literals as written by the deployer
///
/// Text is borrowed, numbers keep the signed types the deployer writes so
/// that negative or zero values reach validation instead of being ruled
/// out by the type system.
#[derive(Clone, Copy)]
pub struct DeviceSource<'a> {
    /// WiFi network name
    pub network_ssid: &'a str,
    /// WiFi passphrase (empty for open networks)
    pub network_password: &'a str,
    /// Subscriber-count API key
    pub api_key: &'a str,
    /// Channel whose statistics are shown
    pub channel_id: &'a str,
    /// Advertised Bluetooth name
    pub bluetooth_name: &'a str,
    /// Added to every temperature reading (°C)
    pub temperature_offset: f32,
    /// Added to every humidity reading (%RH)
    pub humidity_offset: f32,
    /// Soil sensor reading when completely dry
    pub soil_dry: i32,
    /// Soil sensor reading when completely wet
    pub soil_wet: i32,
    /// Backlight auto-off delay (0 = always on)
    pub backlight_timeout_ms: i32,
    /// Inactivity before the menu returns home
    pub menu_timeout_ms: i32,
    /// Upper bound for a WiFi connection attempt
    pub wifi_connect_timeout_ms: i32,
    /// Upper bound for a single API request
    pub api_request_timeout_ms: i32,
}

impl DeviceSource<'static> {
    /// The unedited template: placeholder credentials, stock defaults
    pub const TEMPLATE: Self = Self {
        network_ssid: SSID_PLACEHOLDER,
        network_password: PASSWORD_PLACEHOLDER,
        api_key: API_KEY_PLACEHOLDER,
        channel_id: CHANNEL_ID_PLACEHOLDER,
        bluetooth_name: DEFAULT_BLUETOOTH_NAME,
        temperature_offset: 0.0,
        humidity_offset: 0.0,
        soil_dry: 4095,
        soil_wet: 0,
        backlight_timeout_ms: 30_000,
        menu_timeout_ms: 60_000,
        wifi_connect_timeout_ms: 15_000,
        api_request_timeout_ms: 10_000,
    };
}

impl Default for DeviceSource<'static> {
    fn default() -> Self {
        Self::TEMPLATE
    }
}

impl fmt::Debug for DeviceSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSource")
            .field("network_ssid", &self.network_ssid)
            .field("network_password", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .field("bluetooth_name", &self.bluetooth_name)
            .field("temperature_offset", &self.temperature_offset)
            .field("humidity_offset", &self.humidity_offset)
            .field("soil_dry", &self.soil_dry)
            .field("soil_wet", &self.soil_wet)
            .field("backlight_timeout_ms", &self.backlight_timeout_ms)
            .field("menu_timeout_ms", &self.menu_timeout_ms)
            .field("wifi_connect_timeout_ms", &self.wifi_connect_timeout_ms)
            .field("api_request_timeout_ms", &self.api_request_timeout_ms)
            .finish()
    }
}

/// Configuration field identifier
///
/// Used in errors and diagnostics in place of the field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    NetworkSsid,
    NetworkPassword,
    ApiKey,
    ChannelId,
    BluetoothName,
    TemperatureOffset,
    HumidityOffset,
    SoilDry,
    SoilWet,
    BacklightTimeout,
    MenuTimeout,
    WifiConnectTimeout,
    ApiRequestTimeout,
}

impl Field {
    /// Key of this field in `device.toml`
    pub const fn key(&self) -> &'static str {
        match self {
            Field::NetworkSsid => "wifi.ssid",
            Field::NetworkPassword => "wifi.password",
            Field::ApiKey => "api.key",
            Field::ChannelId => "api.channel_id",
            Field::BluetoothName => "bluetooth.name",
            Field::TemperatureOffset => "calibration.temperature_offset",
            Field::HumidityOffset => "calibration.humidity_offset",
            Field::SoilDry => "calibration.soil_dry",
            Field::SoilWet => "calibration.soil_wet",
            Field::BacklightTimeout => "display.backlight_timeout_ms",
            Field::MenuTimeout => "display.menu_timeout_ms",
            Field::WifiConnectTimeout => "network.wifi_timeout_ms",
            Field::ApiRequestTimeout => "network.api_timeout_ms",
        }
    }

    /// Short label that fits on one display row
    pub const fn label(&self) -> &'static str {
        match self {
            Field::NetworkSsid => "WiFi SSID",
            Field::NetworkPassword => "WiFi password",
            Field::ApiKey => "API key",
            Field::ChannelId => "Channel ID",
            Field::BluetoothName => "BT name",
            Field::TemperatureOffset => "Temp offset",
            Field::HumidityOffset => "Humidity offset",
            Field::SoilDry => "Soil dry ref",
            Field::SoilWet => "Soil wet ref",
            Field::BacklightTimeout => "Backlight timeout",
            Field::MenuTimeout => "Menu timeout",
            Field::WifiConnectTimeout => "WiFi timeout",
            Field::ApiRequestTimeout => "API timeout",
        }
    }

    /// Group this field belongs to
    pub const fn group(&self) -> Group {
        match self {
            Field::NetworkSsid | Field::NetworkPassword => Group::NetworkCredentials,
            Field::ApiKey | Field::ChannelId => Group::ApiCredentials,
            Field::BluetoothName => Group::Bluetooth,
            Field::TemperatureOffset | Field::HumidityOffset | Field::SoilDry | Field::SoilWet => {
                Group::Calibration
            }
            Field::BacklightTimeout | Field::MenuTimeout => Group::UiTimeouts,
            Field::WifiConnectTimeout | Field::ApiRequestTimeout => Group::NetworkTimeouts,
        }
    }

    /// Whether the field holds secret material
    pub const fn is_secret(&self) -> bool {
        matches!(self, Field::NetworkPassword | Field::ApiKey)
    }
}

/// Logical partition of the configuration by consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Group {
    NetworkCredentials,
    ApiCredentials,
    Bluetooth,
    Calibration,
    UiTimeouts,
    NetworkTimeouts,
}

impl Group {
    /// Short label that fits on one display row
    pub const fn label(&self) -> &'static str {
        match self {
            Group::NetworkCredentials => "WiFi",
            Group::ApiCredentials => "API",
            Group::Bluetooth => "Bluetooth",
            Group::Calibration => "Calibration",
            Group::UiTimeouts => "Display",
            Group::NetworkTimeouts => "Net timing",
        }
    }
}

/// Downstream subsystem that consumes configuration groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Subsystem {
    Wifi,
    ApiClient,
    Bluetooth,
    Sensors,
    Display,
}

impl Subsystem {
    /// All subsystems in boot order
    pub const ALL: [Subsystem; 5] = [
        Subsystem::Wifi,
        Subsystem::ApiClient,
        Subsystem::Bluetooth,
        Subsystem::Sensors,
        Subsystem::Display,
    ];

    /// Groups that must be valid before this subsystem may start
    pub const fn groups(&self) -> &'static [Group] {
        match self {
            Subsystem::Wifi => &[Group::NetworkCredentials, Group::NetworkTimeouts],
            Subsystem::ApiClient => &[
                Group::NetworkCredentials,
                Group::ApiCredentials,
                Group::NetworkTimeouts,
            ],
            Subsystem::Bluetooth => &[Group::Bluetooth],
            Subsystem::Sensors => &[Group::Calibration],
            Subsystem::Display => &[Group::UiTimeouts],
        }
    }

    /// Short label for logs and the display
    pub const fn label(&self) -> &'static str {
        match self {
            Subsystem::Wifi => "wifi",
            Subsystem::ApiClient => "api",
            Subsystem::Bluetooth => "bluetooth",
            Subsystem::Sensors => "sensors",
            Subsystem::Display => "display",
        }
    }
}
