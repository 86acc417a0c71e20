//! Configuration types
//!
//! The deployer edits a compiled-in [`DeviceSource`]; at boot it is
//! validated group by group into a [`BootConfig`], and a fully valid
//! source becomes an immutable [`ConfigurationStore`].

pub mod calibration;
pub mod credentials;
pub mod error;
pub mod secret;
pub mod store;
pub mod timing;
pub mod types;

pub use calibration::SensorCalibration;
pub use credentials::{ApiCredentials, BluetoothIdentity, NetworkCredentials};
pub use error::{ConfigError, TextFault, UnsetReason, ValueFault};
pub use secret::Secret;
pub use store::{BootConfig, ConfigurationStore, SubsystemConfig};
pub use timing::{NetworkTimeouts, UiTimeouts};
pub use types::*;

#[cfg(feature = "serde")]
pub use store::PublicSnapshot;
