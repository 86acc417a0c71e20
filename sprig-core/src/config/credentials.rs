//! Credential and identity groups
//!
//! Network and API credentials are rejected while they still hold the
//! template sentinels. Secret halves are stored as [`Secret`].

use heapless::String;

use super::error::{ConfigError, TextFault, UnsetReason};
use super::secret::Secret;
use super::types::{
    DeviceSource, Field, API_KEY_PLACEHOLDER, CHANNEL_ID_PLACEHOLDER, MAX_API_KEY_LEN,
    MAX_CHANNEL_ID_LEN, MAX_DEVICE_NAME_LEN, MAX_PASSWORD_LEN, MAX_SSID_LEN,
    PASSWORD_PLACEHOLDER, SSID_PLACEHOLDER,
};

/// WiFi credentials
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkCredentials {
    ssid: String<MAX_SSID_LEN>,
    password: Secret<MAX_PASSWORD_LEN>,
}

impl NetworkCredentials {
    pub(crate) fn from_source(source: &DeviceSource<'_>) -> Result<Self, ConfigError> {
        require_configured(&[
            Credential::required(Field::NetworkSsid, source.network_ssid, SSID_PLACEHOLDER),
            // An empty passphrase selects an open network
            Credential {
                field: Field::NetworkPassword,
                value: source.network_password,
                placeholder: PASSWORD_PLACEHOLDER,
                required: false,
            },
        ])?;

        Ok(Self {
            ssid: bounded(Field::NetworkSsid, source.network_ssid)?,
            password: Secret::new(bounded(Field::NetworkPassword, source.network_password)?),
        })
    }

    /// Network name
    pub fn ssid(&self) -> &str {
        self.ssid.as_str()
    }

    /// Network passphrase
    pub fn password(&self) -> &Secret<MAX_PASSWORD_LEN> {
        &self.password
    }

    /// Whether the network requires authentication
    pub fn requires_auth(&self) -> bool {
        !self.password.is_empty()
    }
}

/// Subscriber-count API credentials
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ApiCredentials {
    key: Secret<MAX_API_KEY_LEN>,
    channel_id: String<MAX_CHANNEL_ID_LEN>,
}

impl ApiCredentials {
    pub(crate) fn from_source(source: &DeviceSource<'_>) -> Result<Self, ConfigError> {
        require_configured(&[
            Credential::required(Field::ApiKey, source.api_key, API_KEY_PLACEHOLDER),
            Credential::required(Field::ChannelId, source.channel_id, CHANNEL_ID_PLACEHOLDER),
        ])?;

        Ok(Self {
            key: Secret::new(bounded(Field::ApiKey, source.api_key)?),
            channel_id: bounded(Field::ChannelId, source.channel_id)?,
        })
    }

    /// API key
    pub fn api_key(&self) -> &Secret<MAX_API_KEY_LEN> {
        &self.key
    }

    /// Channel identifier
    pub fn channel_id(&self) -> &str {
        self.channel_id.as_str()
    }
}

/// Bluetooth advertising identity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BluetoothIdentity {
    name: String<MAX_DEVICE_NAME_LEN>,
}

impl BluetoothIdentity {
    pub(crate) fn from_source(source: &DeviceSource<'_>) -> Result<Self, ConfigError> {
        if source.bluetooth_name.is_empty() {
            return Err(ConfigError::InvalidText {
                field: Field::BluetoothName,
                fault: TextFault::Empty,
            });
        }

        Ok(Self {
            name: bounded(Field::BluetoothName, source.bluetooth_name)?,
        })
    }

    /// Advertised device name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Credential text paired with its template sentinel
struct Credential<'a> {
    field: Field,
    value: &'a str,
    placeholder: &'static str,
    /// Whether an empty value counts as unconfigured
    required: bool,
}

impl<'a> Credential<'a> {
    const fn required(field: Field, value: &'a str, placeholder: &'static str) -> Self {
        Self {
            field,
            value,
            placeholder,
            required: true,
        }
    }
}

/// Reject a group whose credentials are still sentinels or left empty
///
/// All sentinels in the group are compared before any emptiness check.
fn require_configured(credentials: &[Credential<'_>]) -> Result<(), ConfigError> {
    if let Some(unset) = credentials.iter().find(|c| c.value == c.placeholder) {
        return Err(ConfigError::UnconfiguredCredential {
            field: unset.field,
            reason: UnsetReason::Placeholder,
        });
    }

    if let Some(unset) = credentials.iter().find(|c| c.required && c.value.is_empty()) {
        return Err(ConfigError::UnconfiguredCredential {
            field: unset.field,
            reason: UnsetReason::Empty,
        });
    }

    Ok(())
}

/// Copy text into fixed-capacity storage
fn bounded<const N: usize>(field: Field, value: &str) -> Result<String<N>, ConfigError> {
    let mut out = String::new();
    out.push_str(value).map_err(|_| ConfigError::InvalidText {
        field,
        fault: TextFault::TooLong,
    })?;
    Ok(out)
}
