//! Configuration validation errors
//!
//! Errors name the offending field and the class of problem. They never
//! carry text supplied by the deployer, so they are safe to log and show.

use core::fmt;

use super::types::{Field, Group};

/// Why a credential counts as unconfigured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnsetReason {
    /// Still equal to the template sentinel
    Placeholder,
    /// Left empty
    Empty,
}

/// Problem with a numeric calibration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueFault {
    /// NaN or infinite
    NonFinite,
    /// Outside the sensor's ADC range
    OutOfRange(i32),
}

/// Problem with a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextFault {
    /// Empty where a value is required
    Empty,
    /// Longer than the field's capacity
    TooLong,
}

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A credential or identity field was never configured
    UnconfiguredCredential { field: Field, reason: UnsetReason },
    /// Soil wet and dry references are equal
    InvalidCalibrationRange { dry: u16, wet: u16 },
    /// A timeout is zero where it must be positive, or negative
    InvalidTimeout { field: Field, value: i32 },
    /// An offset is non-finite or a soil reference is out of range
    InvalidCalibrationValue { field: Field, fault: ValueFault },
    /// A text field is empty or does not fit its storage
    InvalidText { field: Field, fault: TextFault },
}

impl ConfigError {
    /// Field the error refers to
    ///
    /// A zero calibration span involves both soil references and is
    /// attributed to the wet reference.
    pub const fn field(&self) -> Field {
        match self {
            ConfigError::UnconfiguredCredential { field, .. }
            | ConfigError::InvalidTimeout { field, .. }
            | ConfigError::InvalidCalibrationValue { field, .. }
            | ConfigError::InvalidText { field, .. } => *field,
            ConfigError::InvalidCalibrationRange { .. } => Field::SoilWet,
        }
    }

    /// Group made unusable by this error
    pub const fn group(&self) -> Group {
        self.field().group()
    }

    /// Ordering used when a single error has to be reported
    ///
    /// Lower is reported first: placeholder credentials, then empty
    /// credentials, then calibration span, then timeouts, then calibration
    /// values, then text capacity.
    pub const fn priority(&self) -> u8 {
        match self {
            ConfigError::UnconfiguredCredential {
                reason: UnsetReason::Placeholder,
                ..
            } => 0,
            ConfigError::UnconfiguredCredential {
                reason: UnsetReason::Empty,
                ..
            } => 1,
            ConfigError::InvalidCalibrationRange { .. } => 2,
            ConfigError::InvalidTimeout { .. } => 3,
            ConfigError::InvalidCalibrationValue { .. } => 4,
            ConfigError::InvalidText { .. } => 5,
        }
    }

    /// Short reason that fits on one display row
    pub const fn reason(&self) -> &'static str {
        match self {
            ConfigError::UnconfiguredCredential {
                reason: UnsetReason::Placeholder,
                ..
            } => "placeholder value",
            ConfigError::UnconfiguredCredential {
                reason: UnsetReason::Empty,
                ..
            } => "not set (empty)",
            ConfigError::InvalidCalibrationRange { .. } => "dry equals wet",
            ConfigError::InvalidTimeout { value, .. } => {
                if *value < 0 {
                    "negative timeout"
                } else {
                    "must be above 0"
                }
            }
            ConfigError::InvalidCalibrationValue {
                fault: ValueFault::NonFinite,
                ..
            } => "not a finite number",
            ConfigError::InvalidCalibrationValue {
                fault: ValueFault::OutOfRange(_),
                ..
            } => "outside 0-4095",
            ConfigError::InvalidText {
                fault: TextFault::Empty,
                ..
            } => "must not be empty",
            ConfigError::InvalidText {
                fault: TextFault::TooLong,
                ..
            } => "too long",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnconfiguredCredential { field, reason } => match reason {
                UnsetReason::Placeholder => {
                    write!(f, "{} still holds its placeholder value", field.key())
                }
                UnsetReason::Empty => write!(f, "{} is empty", field.key()),
            },
            ConfigError::InvalidCalibrationRange { dry, wet } => write!(
                f,
                "soil calibration span is zero (dry = {}, wet = {})",
                dry, wet
            ),
            ConfigError::InvalidTimeout { field, value } => {
                write!(f, "{} = {} is not a valid timeout", field.key(), value)
            }
            ConfigError::InvalidCalibrationValue { field, fault } => match fault {
                ValueFault::NonFinite => write!(f, "{} is not a finite number", field.key()),
                ValueFault::OutOfRange(value) => write!(
                    f,
                    "{} = {} is outside the sensor range 0..={}",
                    field.key(),
                    value,
                    super::types::ADC_MAX
                ),
            },
            ConfigError::InvalidText { field, fault } => match fault {
                TextFault::Empty => write!(f, "{} must not be empty", field.key()),
                TextFault::TooLong => write!(f, "{} is too long", field.key()),
            },
        }
    }
}
