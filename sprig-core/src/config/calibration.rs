//! Sensor calibration
//!
//! Offsets for the climate sensor and the wet/dry references that turn a
//! raw soil reading into a moisture percentage.

#[cfg(feature = "serde")]
use serde::Serialize;

use super::error::{ConfigError, ValueFault};
use super::types::{DeviceSource, Field, ADC_MAX};

/// Validated sensor calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SensorCalibration {
    temperature_offset: f32,
    humidity_offset: f32,
    soil_dry: u16,
    soil_wet: u16,
}

impl SensorCalibration {
    /// Validate the calibration fields of a source
    ///
    /// The soil references are checked before the offsets so that a zero
    /// span is reported ahead of a bad offset.
    pub(crate) fn from_source(source: &DeviceSource<'_>) -> Result<Self, ConfigError> {
        let soil_dry = adc_reading(Field::SoilDry, source.soil_dry)?;
        let soil_wet = adc_reading(Field::SoilWet, source.soil_wet)?;
        if soil_dry == soil_wet {
            return Err(ConfigError::InvalidCalibrationRange {
                dry: soil_dry,
                wet: soil_wet,
            });
        }

        Ok(Self {
            temperature_offset: finite(Field::TemperatureOffset, source.temperature_offset)?,
            humidity_offset: finite(Field::HumidityOffset, source.humidity_offset)?,
            soil_dry,
            soil_wet,
        })
    }

    /// Temperature correction (°C)
    pub fn temperature_offset(&self) -> f32 {
        self.temperature_offset
    }

    /// Humidity correction (%RH)
    pub fn humidity_offset(&self) -> f32 {
        self.humidity_offset
    }

    /// Soil reading when completely dry
    pub fn soil_dry(&self) -> u16 {
        self.soil_dry
    }

    /// Soil reading when completely wet
    pub fn soil_wet(&self) -> u16 {
        self.soil_wet
    }

    /// Width of the calibration span in ADC counts (never zero)
    pub fn span(&self) -> u16 {
        self.soil_dry.abs_diff(self.soil_wet)
    }

    /// Convert a raw soil reading to moisture (0 = dry, 100 = wet)
    ///
    /// Works for sensors whose reading falls with moisture (dry > wet) and
    /// for those where it rises. Readings beyond either reference clamp.
    pub fn moisture_percent(&self, raw: u16) -> u8 {
        let raw = i32::from(raw.min(ADC_MAX));
        let dry = i32::from(self.soil_dry);
        let wet = i32::from(self.soil_wet);

        let percent = ((dry - raw) * 100).checked_div(dry - wet).unwrap_or(0);
        percent.clamp(0, 100) as u8
    }

    /// Apply the temperature offset to a reading
    pub fn corrected_temperature(&self, celsius: f32) -> f32 {
        celsius + self.temperature_offset
    }

    /// Apply the humidity offset, keeping the result within 0-100 %RH
    pub fn corrected_humidity(&self, relative: f32) -> f32 {
        (relative + self.humidity_offset).clamp(0.0, 100.0)
    }
}

fn adc_reading(field: Field, value: i32) -> Result<u16, ConfigError> {
    match u16::try_from(value) {
        Ok(reading) if reading <= ADC_MAX => Ok(reading),
        _ => Err(ConfigError::InvalidCalibrationValue {
            field,
            fault: ValueFault::OutOfRange(value),
        }),
    }
}

fn finite(field: Field, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidCalibrationValue {
            field,
            fault: ValueFault::NonFinite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn calibration(dry: i32, wet: i32) -> Result<SensorCalibration, ConfigError> {
        SensorCalibration::from_source(&DeviceSource {
            soil_dry: dry,
            soil_wet: wet,
            ..DeviceSource::TEMPLATE
        })
    }

    #[test]
    fn test_stock_calibration() {
        let cal = calibration(4095, 0).unwrap();
        assert_eq!(cal.soil_dry(), 4095);
        assert_eq!(cal.soil_wet(), 0);
        assert_eq!(cal.span(), 4095);
        assert_eq!(cal.temperature_offset(), 0.0);
        assert_eq!(cal.humidity_offset(), 0.0);
    }

    #[test]
    fn test_zero_span_rejected() {
        assert_eq!(
            calibration(2048, 2048),
            Err(ConfigError::InvalidCalibrationRange {
                dry: 2048,
                wet: 2048
            })
        );
    }

    #[test]
    fn test_out_of_range_reference() {
        assert_eq!(
            calibration(5000, 0),
            Err(ConfigError::InvalidCalibrationValue {
                field: Field::SoilDry,
                fault: ValueFault::OutOfRange(5000),
            })
        );
        assert_eq!(
            calibration(4095, -1),
            Err(ConfigError::InvalidCalibrationValue {
                field: Field::SoilWet,
                fault: ValueFault::OutOfRange(-1),
            })
        );
    }

    #[test]
    fn test_non_finite_offsets() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let source = DeviceSource {
                temperature_offset: bad,
                ..DeviceSource::TEMPLATE
            };
            assert_eq!(
                SensorCalibration::from_source(&source),
                Err(ConfigError::InvalidCalibrationValue {
                    field: Field::TemperatureOffset,
                    fault: ValueFault::NonFinite,
                })
            );
        }

        let source = DeviceSource {
            humidity_offset: f32::NAN,
            ..DeviceSource::TEMPLATE
        };
        let err = SensorCalibration::from_source(&source).unwrap_err();
        assert_eq!(err.field(), Field::HumidityOffset);
    }

    #[test]
    fn test_span_reported_before_offset() {
        let source = DeviceSource {
            temperature_offset: f32::NAN,
            soil_dry: 100,
            soil_wet: 100,
            ..DeviceSource::TEMPLATE
        };
        assert!(matches!(
            SensorCalibration::from_source(&source),
            Err(ConfigError::InvalidCalibrationRange { .. })
        ));
    }

    #[test]
    fn test_negative_offset_kept() {
        let source = DeviceSource {
            temperature_offset: -1.5,
            ..DeviceSource::TEMPLATE
        };
        let cal = SensorCalibration::from_source(&source).unwrap();
        assert_eq!(cal.temperature_offset(), -1.5);
        assert_eq!(cal.corrected_temperature(21.5), 20.0);
    }

    #[test]
    fn test_moisture_falling_sensor() {
        // Capacitive probes read high when dry
        let cal = calibration(4095, 0).unwrap();
        assert_eq!(cal.moisture_percent(4095), 0);
        assert_eq!(cal.moisture_percent(0), 100);
        assert_eq!(cal.moisture_percent(2048), 49);
    }

    #[test]
    fn test_moisture_rising_sensor() {
        let cal = calibration(1000, 3000).unwrap();
        assert_eq!(cal.moisture_percent(1000), 0);
        assert_eq!(cal.moisture_percent(2000), 50);
        assert_eq!(cal.moisture_percent(3000), 100);
        // Beyond the references
        assert_eq!(cal.moisture_percent(500), 0);
        assert_eq!(cal.moisture_percent(3500), 100);
    }

    #[test]
    fn test_humidity_clamped() {
        let source = DeviceSource {
            humidity_offset: 5.0,
            ..DeviceSource::TEMPLATE
        };
        let cal = SensorCalibration::from_source(&source).unwrap();
        assert_eq!(cal.corrected_humidity(50.0), 55.0);
        assert_eq!(cal.corrected_humidity(98.0), 100.0);
    }

    proptest! {
        #[test]
        fn prop_moisture_within_bounds(
            dry in 0i32..=4095,
            wet in 0i32..=4095,
            raw in any::<u16>(),
        ) {
            prop_assume!(dry != wet);
            let cal = calibration(dry, wet).unwrap();
            prop_assert!(cal.moisture_percent(raw) <= 100);
        }

        #[test]
        fn prop_references_map_to_ends(dry in 0i32..=4095, wet in 0i32..=4095) {
            prop_assume!(dry != wet);
            let cal = calibration(dry, wet).unwrap();
            prop_assert_eq!(cal.moisture_percent(dry as u16), 0);
            prop_assert_eq!(cal.moisture_percent(wet as u16), 100);
        }
    }
}
