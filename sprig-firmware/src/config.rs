//! Compiled-in device configuration
//!
//! `DEVICE_SOURCE` is generated by build.rs from device.toml.
//! Edit device.toml and rebuild to customize.

use sprig_core::config::DeviceSource;

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));
