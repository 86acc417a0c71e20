//! Build script for sprig-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml and compiles it into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sprig_core::config::{ConfigurationStore, DeviceSource};

/// Sections and keys accepted in device.toml
const SCHEMA: &[(&str, &[&str])] = &[
    ("wifi", &["ssid", "password"]),
    ("api", &["key", "channel_id"]),
    ("bluetooth", &["name"]),
    (
        "calibration",
        &["temperature_offset", "humidity_offset", "soil_dry", "soil_wet"],
    ),
    ("display", &["backlight_timeout_ms", "menu_timeout_ms"]),
    ("network", &["wifi_timeout_ms", "api_timeout_ms"]),
];

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml and write it out as a `DeviceSource` constant
fn generate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a device.toml configuration file.         ║\n\
            ║  Please create one in the sprig-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read device.toml", &[e.to_string()]),
    };

    let config: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => fail(
            "Invalid TOML syntax in device.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut reader = Reader::new(&config);
    reader.check_unknown();
    let template = DeviceSource::TEMPLATE;
    let source = DeviceSource {
        network_ssid: reader.text("wifi", "ssid", None),
        network_password: reader.text("wifi", "password", None),
        api_key: reader.text("api", "key", None),
        channel_id: reader.text("api", "channel_id", None),
        bluetooth_name: reader.text("bluetooth", "name", Some(template.bluetooth_name)),
        temperature_offset: reader.float("calibration", "temperature_offset", template.temperature_offset),
        humidity_offset: reader.float("calibration", "humidity_offset", template.humidity_offset),
        soil_dry: reader.integer("calibration", "soil_dry", template.soil_dry),
        soil_wet: reader.integer("calibration", "soil_wet", template.soil_wet),
        backlight_timeout_ms: reader.integer("display", "backlight_timeout_ms", template.backlight_timeout_ms),
        menu_timeout_ms: reader.integer("display", "menu_timeout_ms", template.menu_timeout_ms),
        wifi_connect_timeout_ms: reader.integer("network", "wifi_timeout_ms", template.wifi_connect_timeout_ms),
        api_request_timeout_ms: reader.integer("network", "api_timeout_ms", template.api_request_timeout_ms),
    };

    if !reader.errors.is_empty() {
        fail("Invalid configuration in device.toml", &reader.errors);
    }

    // Value problems are reported by the device at boot so that the
    // subsystems that do not depend on them still come up.
    let boot = ConfigurationStore::load(&source);
    for fault in boot.faults() {
        println!("cargo:warning=device.toml: {}", fault);
    }
    if boot.is_complete() {
        println!("cargo:warning=device.toml validated successfully");
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("device_config.rs"), render(&source)).unwrap();
}

/// Typed access to device.toml that collects every problem
struct Reader<'a> {
    config: &'a toml::Table,
    errors: Vec<String>,
}

impl<'a> Reader<'a> {
    fn new(config: &'a toml::Table) -> Self {
        Self {
            config,
            errors: Vec::new(),
        }
    }

    /// Flag sections and keys that would otherwise be silently ignored
    fn check_unknown(&mut self) {
        for (section, value) in self.config {
            let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| *name == section.as_str()) else {
                self.errors.push(format!("Unknown section [{}]", section));
                continue;
            };
            let Some(table) = value.as_table() else {
                self.errors.push(format!("[{}] must be a table", section));
                continue;
            };
            for key in table.keys() {
                if !keys.contains(&key.as_str()) {
                    self.errors.push(format!("[{}] unknown key '{}'", section, key));
                }
            }
        }
    }

    fn get(&self, section: &str, key: &str) -> Option<&'a toml::Value> {
        self.config.get(section)?.as_table()?.get(key)
    }

    fn text(&mut self, section: &str, key: &str, default: Option<&'a str>) -> &'a str {
        match (self.get(section, key), default) {
            (Some(toml::Value::String(s)), _) => s.as_str(),
            (Some(_), _) => {
                self.errors.push(format!("[{}] {} must be a string", section, key));
                ""
            }
            (None, Some(default)) => default,
            (None, None) => {
                self.errors.push(format!("[{}] missing '{}'", section, key));
                ""
            }
        }
    }

    fn float(&mut self, section: &str, key: &str, default: f32) -> f32 {
        match self.get(section, key) {
            Some(toml::Value::Float(f)) => *f as f32,
            Some(toml::Value::Integer(i)) => *i as f32,
            Some(_) => {
                self.errors.push(format!("[{}] {} must be a number", section, key));
                default
            }
            None => default,
        }
    }

    fn integer(&mut self, section: &str, key: &str, default: i32) -> i32 {
        match self.get(section, key) {
            Some(toml::Value::Integer(i)) => match i32::try_from(*i) {
                Ok(value) => value,
                Err(_) => {
                    self.errors.push(format!("[{}] {} is out of range", section, key));
                    default
                }
            },
            Some(_) => {
                self.errors.push(format!("[{}] {} must be an integer", section, key));
                default
            }
            None => default,
        }
    }
}

/// Render the source as Rust code
fn render(source: &DeviceSource<'_>) -> String {
    format!(
        "// Generated by build.rs from device.toml. Do not edit.\n\
        pub const DEVICE_SOURCE: DeviceSource<'static> = DeviceSource {{\n    \
            network_ssid: {:?},\n    \
            network_password: {:?},\n    \
            api_key: {:?},\n    \
            channel_id: {:?},\n    \
            bluetooth_name: {:?},\n    \
            temperature_offset: {},\n    \
            humidity_offset: {},\n    \
            soil_dry: {},\n    \
            soil_wet: {},\n    \
            backlight_timeout_ms: {},\n    \
            menu_timeout_ms: {},\n    \
            wifi_connect_timeout_ms: {},\n    \
            api_request_timeout_ms: {},\n\
        }};\n",
        source.network_ssid,
        source.network_password,
        source.api_key,
        source.channel_id,
        source.bluetooth_name,
        float_literal(source.temperature_offset),
        float_literal(source.humidity_offset),
        source.soil_dry,
        source.soil_wet,
        source.backlight_timeout_ms,
        source.menu_timeout_ms,
        source.wifi_connect_timeout_ms,
        source.api_request_timeout_ms,
    )
}

/// f32 literal, including the non-finite values TOML can express
fn float_literal(value: f32) -> String {
    if value.is_nan() {
        "f32::NAN".to_string()
    } else if value == f32::INFINITY {
        "f32::INFINITY".to_string()
    } else if value == f32::NEG_INFINITY {
        "f32::NEG_INFINITY".to_string()
    } else {
        format!("{:?}", value)
    }
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| {
                let truncated = if e.chars().count() > 62 {
                    format!("{}...", e.chars().take(59).collect::<String>())
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
