//! Simple TOML parser for the board configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `board.toml`. It does NOT support full TOML.
//!
//! Supported features:
//! - Key = value pairs (integer, hex integer, string)
//! - [section] headers
//! - Single-line integer arrays: led_addresses = [0x08, 0x09]
//! - Comments (# ...)
//!
//! Example:
//!
//! ```toml
//! [bus]
//! led_addresses = [0x08, 0x09, 0x0A]
//! frequency_hz = 100000
//!
//! [timing]
//! tick_interval_ms = 100
//! time_unit_ms = 10
//!
//! [mode]
//! start = "on"
//! ```

use heapless::Vec;

use super::hardware::{
    BoardConfig, I2C_ADDRESS_RANGE, I2C_FREQUENCY_RANGE_HZ, MAX_INTERVAL_MS,
};
use crate::bus::MAX_CHAIN_LEN;
use crate::state::LightState;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection { line: u16 },
    /// Key not known in its section
    UnknownKey { line: u16 },
    /// Line is not `key = value`
    InvalidLine { line: u16 },
    /// Value has the wrong type or is out of range
    InvalidValue { line: u16 },
    /// More LED addresses than the chain can hold
    TooManyItems { line: u16 },
    /// LED address list is empty
    NoAddresses,
    /// Tick interval or time unit is zero
    ZeroInterval,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Bus,
    Timing,
    Mode,
}

/// Parse TOML configuration into a [`BoardConfig`]
///
/// Keys that are not given keep their defaults.
pub fn parse_config(input: &str) -> Result<BoardConfig, ConfigError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;

    for (n, raw) in input.lines().enumerate() {
        let line_no = (n + 1) as u16;
        let line = strip_comment(raw).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ConfigError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(ConfigError::InvalidLine { line: line_no })?;
        let key = key.trim();
        let value = value.trim();
        let invalid = ConfigError::InvalidValue { line: line_no };

        match (section, key) {
            (Section::Bus, "led_addresses") => {
                config.led_addresses = parse_address_list(value, line_no)?;
            }
            (Section::Bus, "frequency_hz") => {
                config.i2c_frequency_hz = parse_int(value)
                    .filter(|f| I2C_FREQUENCY_RANGE_HZ.contains(f))
                    .ok_or(invalid)?;
            }
            (Section::Timing, "tick_interval_ms") => {
                config.tick_interval_ms = parse_interval(value).ok_or(invalid)?;
            }
            (Section::Timing, "time_unit_ms") => {
                config.time_unit_ms = parse_interval(value).ok_or(invalid)?;
            }
            (Section::Mode, "start") => {
                config.start_mode = parse_mode(parse_string(value).ok_or(invalid)?)
                    .ok_or(invalid)?;
            }
            _ => return Err(ConfigError::UnknownKey { line: line_no }),
        }
    }

    if config.led_addresses.is_empty() {
        return Err(ConfigError::NoAddresses);
    }
    if config.tick_interval_ms == 0 || config.time_unit_ms == 0 {
        return Err(ConfigError::ZeroInterval);
    }

    Ok(config)
}

/// Drop a trailing `# comment` unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name.trim() {
        "bus" => Some(Section::Bus),
        "timing" => Some(Section::Timing),
        "mode" => Some(Section::Mode),
        _ => None,
    }
}

/// Parse a decimal or `0x` hex integer
fn parse_int(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}

/// Interval in ms; zero is left to the final [`ConfigError::ZeroInterval`] check
fn parse_interval(value: &str) -> Option<u32> {
    parse_int(value).filter(|&ms| ms <= MAX_INTERVAL_MS)
}

fn parse_string(value: &str) -> Option<&str> {
    value.strip_prefix('"')?.strip_suffix('"')
}

fn parse_mode(name: &str) -> Option<LightState> {
    match name {
        "off" => Some(LightState::Off),
        "maintenance" => Some(LightState::Maintenance),
        "on" => Some(LightState::On),
        "debug" => Some(LightState::Debug),
        _ => None,
    }
}

fn parse_address_list(value: &str, line: u16) -> Result<Vec<u8, MAX_CHAIN_LEN>, ConfigError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ConfigError::InvalidValue { line })?;

    let mut addresses = Vec::new();
    for item in inner.split(',') {
        let item = item.trim();
        // Allow a trailing comma
        if item.is_empty() {
            continue;
        }
        let address = parse_int(item)
            .and_then(|a| u8::try_from(a).ok())
            .filter(|a| I2C_ADDRESS_RANGE.contains(a))
            .ok_or(ConfigError::InvalidValue { line })?;
        addresses
            .push(address)
            .map_err(|_| ConfigError::TooManyItems { line })?;
    }

    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD_TOML: &str = r#"
# Ligght board configuration

[bus]
led_addresses = [0x08, 0x09, 0x0A]   # chain order
frequency_hz = 400000

[timing]
tick_interval_ms = 50
time_unit_ms = 100

[mode]
start = "maintenance"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(BOARD_TOML).unwrap();

        assert_eq!(config.led_addresses.as_slice(), &[0x08, 0x09, 0x0A]);
        assert_eq!(config.i2c_frequency_hz, 400_000);
        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.time_unit_ms, 100);
        assert_eq!(config.start_mode, LightState::Maintenance);
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), BoardConfig::default());
    }

    #[test]
    fn test_unknown_section() {
        let err = parse_config("[display]\nrows = 8\n").unwrap_err();
        assert_eq!(err, ConfigError::InvalidSection { line: 1 });
    }

    #[test]
    fn test_unknown_key() {
        let err = parse_config("[bus]\nspeed = 3\n").unwrap_err();
        assert_eq!(err, ConfigError::UnknownKey { line: 2 });
    }

    #[test]
    fn test_reserved_address_rejected() {
        for input in [
            "[bus]\nled_addresses = [0x00]\n",
            "[bus]\nled_addresses = [0x07]\n",
            "[bus]\nled_addresses = [0x08, 0x78]\n",
            "[bus]\nled_addresses = [0x108]\n",
        ] {
            assert_eq!(
                parse_config(input).unwrap_err(),
                ConfigError::InvalidValue { line: 2 },
                "{}",
                input
            );
        }

        let config = parse_config("[bus]\nled_addresses = [0x08, 0x77]\n").unwrap();
        assert_eq!(config.led_addresses.as_slice(), &[0x08, 0x77]);
    }

    #[test]
    fn test_frequency_range() {
        for input in [
            "[bus]\nfrequency_hz = 0\n",
            "[bus]\nfrequency_hz = 9999\n",
            "[bus]\nfrequency_hz = 1000001\n",
        ] {
            assert_eq!(
                parse_config(input).unwrap_err(),
                ConfigError::InvalidValue { line: 2 }
            );
        }
        let config = parse_config("[bus]\nfrequency_hz = 1000000\n").unwrap();
        assert_eq!(config.i2c_frequency_hz, 1_000_000);
    }

    #[test]
    fn test_interval_upper_bound() {
        let err = parse_config("[timing]\ntick_interval_ms = 10001\n").unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue { line: 2 });

        let err = parse_config("[timing]\ntime_unit_ms = 0\n").unwrap_err();
        assert_eq!(err, ConfigError::ZeroInterval);
    }

    #[test]
    fn test_empty_address_list() {
        let err = parse_config("[bus]\nled_addresses = []\n").unwrap_err();
        assert_eq!(err, ConfigError::NoAddresses);
    }

    #[test]
    fn test_too_many_addresses() {
        let err =
            parse_config("[bus]\nled_addresses = [8, 9, 10, 11, 12, 13, 14, 15, 16]\n").unwrap_err();
        assert_eq!(err, ConfigError::TooManyItems { line: 2 });
    }

    #[test]
    fn test_zero_tick_rejected() {
        let err = parse_config("[timing]\ntick_interval_ms = 0\n").unwrap_err();
        assert_eq!(err, ConfigError::ZeroInterval);
    }

    #[test]
    fn test_bad_mode_name() {
        let err = parse_config("[mode]\nstart = \"blink\"\n").unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue { line: 2 });
    }

    #[test]
    fn test_missing_equals() {
        let err = parse_config("[timing]\ntick_interval_ms 100\n").unwrap_err();
        assert_eq!(err, ConfigError::InvalidLine { line: 2 });
    }
}
