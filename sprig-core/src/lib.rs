//! Board-agnostic core logic for the Sprig dashboard firmware
//!
//! This crate owns the device configuration and does not depend on any
//! specific hardware:
//!
//! - Deployer-facing configuration source and its defaults
//! - Validation into an immutable, group-partitioned snapshot
//! - Sensor calibration and UI/network timing helpers
//! - Diagnostic screens for configuration faults

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod diagnostic;
