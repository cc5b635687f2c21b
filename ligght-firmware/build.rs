//! Build script for ligght-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds board.toml for its bus and timing setup.    ║\n\
            ║  Please create one in the ligght-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("Failed to read board.toml: {}", e),
    };

    let config: toml::Value = match content.parse() {
        Ok(v) => v,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_bus(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_mode(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml validation failed                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate the [bus] section
///
/// Ranges match the on-device parser in `ligght_core::config`.
fn validate_bus(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(bus) = config.get("bus") else {
        return;
    };

    if let Some(addresses) = bus.get("led_addresses") {
        match addresses.as_array() {
            Some(list) if list.is_empty() => {
                errors.push("[bus] led_addresses must not be empty".to_string());
            }
            Some(list) if list.len() > 8 => {
                errors.push("[bus] at most 8 led_addresses are supported".to_string());
            }
            Some(list) => {
                for item in list {
                    match item.as_integer() {
                        Some(a) if (0x08..=0x77).contains(&a) => {}
                        _ => errors.push(format!(
                            "[bus] led address {} is not a usable 7-bit address",
                            item
                        )),
                    }
                }
            }
            None => errors.push("[bus] led_addresses must be an array".to_string()),
        }
    }

    if let Some(freq) = bus.get("frequency_hz") {
        if !matches!(freq.as_integer(), Some(f) if (10_000..=1_000_000).contains(&f)) {
            errors.push("[bus] frequency_hz must be 10000-1000000".to_string());
        }
    }
}

/// Validate the [timing] section
fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = config.get("timing") else {
        return;
    };

    for key in ["tick_interval_ms", "time_unit_ms"] {
        if let Some(value) = timing.get(key) {
            if !matches!(value.as_integer(), Some(v) if v > 0 && v <= 10_000) {
                errors.push(format!("[timing] {} must be 1-10000", key));
            }
        }
    }
}

/// Validate the [mode] section
fn validate_mode(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(start) = config.get("mode").and_then(|m| m.get("start")) else {
        return;
    };

    if !matches!(
        start.as_str(),
        Some("off" | "maintenance" | "on" | "debug")
    ) {
        errors.push("[mode] start must be off, maintenance, on or debug".to_string());
    }
}
