//! Diagnostic screen buffer
//!
//! Sized for the 20x4 character LCD on the dashboard.

use core::fmt::Write;

use heapless::String;

use crate::config::{BootConfig, ConfigError, Subsystem};

/// Number of character rows on the display
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns on the display
pub const LINE_LEN: usize = 20;

/// Fixed text screen describing the configuration state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiagnosticScreen {
    lines: [String<LINE_LEN>; SCREEN_ROWS],
}

impl DiagnosticScreen {
    fn blank() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
        }
    }

    /// Describe a single configuration error
    ///
    /// Rows: title, failed group, field, reason.
    pub fn from_error(error: &ConfigError) -> Self {
        let mut screen = Self::blank();
        screen.set_line(0, "CONFIG ERROR");

        let mut group: String<32> = String::new();
        let _ = write!(group, "{} group failed", error.group().label());
        screen.set_line(1, &group);

        screen.set_line(2, error.field().label());
        screen.set_line(3, error.reason());
        screen
    }

    /// Summarize a boot-time validation result
    ///
    /// Shows the highest-priority fault with a fault count, or a ready
    /// summary when every group is valid.
    pub fn from_boot(boot: &BootConfig) -> Self {
        let faults = boot.faults().count();
        let Some(first) = boot.first_fault() else {
            let mut screen = Self::blank();
            screen.set_line(0, "CONFIG OK");
            let mut ready: String<32> = String::new();
            let _ = write!(ready, "{} subsystems ready", Subsystem::ALL.len());
            screen.set_line(1, &ready);
            return screen;
        };

        let mut screen = Self::from_error(&first);
        if faults > 1 {
            let mut title: String<32> = String::new();
            let _ = write!(title, "CONFIG ERROR 1/{}", faults);
            screen.set_line(0, &title);
        }
        screen
    }

    /// Content of a row
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// All rows, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            // Truncate if too long
            let mut end = text.len().min(LINE_LEN);
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            let _ = line.push_str(&text[..end]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ConfigurationStore, DeviceSource, Field, UnsetReason, ValueFault, API_KEY_PLACEHOLDER,
    };

    fn configured() -> DeviceSource<'static> {
        DeviceSource {
            network_ssid: "greenhouse",
            network_password: "correct horse",
            api_key: "AIzaSyExampleKey",
            channel_id: "UC_x5XG1OV2P6uZZ5FSM9Ttw",
            ..DeviceSource::TEMPLATE
        }
    }

    #[test]
    fn test_unconfigured_api_key_screen() {
        let screen = DiagnosticScreen::from_error(&ConfigError::UnconfiguredCredential {
            field: Field::ApiKey,
            reason: UnsetReason::Placeholder,
        });
        assert_eq!(screen.line(0), Some("CONFIG ERROR"));
        assert_eq!(screen.line(1), Some("API group failed"));
        assert_eq!(screen.line(2), Some("API key"));
        assert_eq!(screen.line(3), Some("placeholder value"));
        assert_eq!(screen.line(4), None);
    }

    #[test]
    fn test_rows_fit_display() {
        let errors = [
            ConfigError::InvalidCalibrationValue {
                field: Field::HumidityOffset,
                fault: ValueFault::NonFinite,
            },
            ConfigError::InvalidTimeout {
                field: Field::BacklightTimeout,
                value: -1,
            },
            ConfigError::InvalidCalibrationRange { dry: 7, wet: 7 },
        ];
        for error in &errors {
            let screen = DiagnosticScreen::from_error(error);
            assert!(screen.lines().all(|line| line.len() <= LINE_LEN));
        }
    }

    #[test]
    fn test_calibration_group_label_truncated() {
        let screen = DiagnosticScreen::from_error(&ConfigError::InvalidCalibrationRange {
            dry: 2048,
            wet: 2048,
        });
        // "Calibration group failed" is cut at the display width
        assert_eq!(screen.line(1), Some("Calibration group fa"));
        assert_eq!(screen.line(3), Some("dry equals wet"));
    }

    #[test]
    fn test_boot_summary_counts_faults() {
        let boot = ConfigurationStore::load(&DeviceSource::TEMPLATE);
        let screen = DiagnosticScreen::from_boot(&boot);
        assert_eq!(screen.line(0), Some("CONFIG ERROR 1/2"));
        assert_eq!(screen.line(1), Some("WiFi group failed"));
        assert_eq!(screen.line(2), Some("WiFi SSID"));
    }

    #[test]
    fn test_boot_summary_single_fault() {
        let source = DeviceSource {
            api_key: API_KEY_PLACEHOLDER,
            ..configured()
        };
        let screen = DiagnosticScreen::from_boot(&ConfigurationStore::load(&source));
        assert_eq!(screen.line(0), Some("CONFIG ERROR"));
        assert_eq!(screen.line(2), Some("API key"));
    }

    #[test]
    fn test_boot_summary_ok() {
        let screen = DiagnosticScreen::from_boot(&ConfigurationStore::load(&configured()));
        assert_eq!(screen.line(0), Some("CONFIG OK"));
        assert_eq!(screen.line(1), Some("5 subsystems ready"));
    }

    #[test]
    fn test_screen_never_contains_secret() {
        let source = DeviceSource {
            network_password: "swordfish-password",
            api_key: API_KEY_PLACEHOLDER,
            ..configured()
        };
        let screen = DiagnosticScreen::from_boot(&ConfigurationStore::load(&source));
        assert!(screen.lines().all(|line| !line.contains("swordfish")));
        assert!(screen.lines().all(|line| !line.contains("YOUR_")));
    }
}
