//! Board configuration
//!
//! Immutable description of the bus and timing of one controller board,
//! built once at startup from the embedded `board.toml`.

use core::ops::RangeInclusive;

use heapless::Vec;

use crate::bus::{ChainConfig, RoleFlags, MAX_CHAIN_LEN};
use crate::program::TimeScale;
use crate::state::LightState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of DIP switches on the board
pub const DIP_SWITCH_COUNT: usize = 4;

/// Default addresses of the LED boards
pub const DEFAULT_LED_ADDRESSES: [u8; 3] = [0x08, 0x09, 0x0A];

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 100;

/// 7-bit addresses outside the reserved blocks at both ends
pub const I2C_ADDRESS_RANGE: RangeInclusive<u8> = 0x08..=0x77;

/// Supported I2C clock rates
pub const I2C_FREQUENCY_RANGE_HZ: RangeInclusive<u32> = 10_000..=1_000_000;

/// Longest accepted tick interval or time unit
pub const MAX_INTERVAL_MS: u32 = 10_000;

/// Controller board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Addresses of the LED boards, in chain order
    pub led_addresses: Vec<u8, MAX_CHAIN_LEN>,
    /// I2C clock in Hz
    pub i2c_frequency_hz: u32,
    /// Period of the sequencer tick
    pub tick_interval_ms: u32,
    /// Milliseconds per schedule unit
    pub time_unit_ms: u32,
    /// Mode entered after boot
    pub start_mode: LightState,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let mut led_addresses = Vec::new();
        let _ = led_addresses.extend_from_slice(&DEFAULT_LED_ADDRESSES);
        Self {
            led_addresses,
            i2c_frequency_hz: 100_000,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            time_unit_ms: TimeScale::STANDARD.unit_ms,
            start_mode: LightState::On,
        }
    }
}

impl BoardConfig {
    /// Time scale for the program tables
    pub fn time_scale(&self) -> TimeScale {
        TimeScale::from_unit_ms(self.time_unit_ms)
    }
}

/// Positions of the DIP switches, read once at boot
///
/// - switch 0: fixture is a simple traffic light
/// - switch 1: board is used as slave
/// - switches 2-3: number of connected LED boards minus one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DipSwitches {
    /// True if the switch is in the ON position
    pub on: [bool; DIP_SWITCH_COUNT],
}

impl DipSwitches {
    pub const fn new(on: [bool; DIP_SWITCH_COUNT]) -> Self {
        Self { on }
    }

    /// Role selected by switches 0 and 1
    pub fn roles(&self) -> RoleFlags {
        RoleFlags {
            is_simple_traffic_light: self.on[0],
            is_used_as_slave: self.on[1],
        }
    }

    /// Number of boards selected by switches 2 and 3 (1-4)
    pub fn board_count(&self) -> usize {
        1 + usize::from(self.on[2]) + 2 * usize::from(self.on[3])
    }

    /// Chain for this board
    ///
    /// The board count is capped at the number of configured addresses.
    pub fn chain(&self, config: &BoardConfig) -> ChainConfig {
        let count = self.board_count().min(config.led_addresses.len());
        ChainConfig::new(&config.led_addresses[..count], self.roles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();

        assert_eq!(config.led_addresses.as_slice(), &[0x08, 0x09, 0x0A]);
        assert!(config
            .led_addresses
            .iter()
            .all(|a| I2C_ADDRESS_RANGE.contains(a)));
        assert!(I2C_FREQUENCY_RANGE_HZ.contains(&config.i2c_frequency_hz));
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.time_scale(), TimeScale::STANDARD);
        assert_eq!(config.start_mode, LightState::On);
    }

    #[test]
    fn test_all_switches_off() {
        let dips = DipSwitches::default();
        let chain = dips.chain(&BoardConfig::default());

        assert_eq!(chain.roles, RoleFlags::JUNCTION_MASTER);
        assert_eq!(chain.addresses.as_slice(), &[0x08]);
    }

    #[test]
    fn test_role_switches() {
        let dips = DipSwitches::new([true, true, false, false]);
        let roles = dips.roles();

        assert!(roles.is_simple_traffic_light);
        assert!(roles.is_used_as_slave);
    }

    #[test]
    fn test_board_count_switches() {
        assert_eq!(DipSwitches::new([false, false, true, false]).board_count(), 2);
        assert_eq!(DipSwitches::new([false, false, false, true]).board_count(), 3);
        assert_eq!(DipSwitches::new([false, false, true, true]).board_count(), 4);
    }

    #[test]
    fn test_board_count_capped_by_addresses() {
        let dips = DipSwitches::new([false, true, true, true]);
        let chain = dips.chain(&BoardConfig::default());

        assert_eq!(chain.addresses.as_slice(), &[0x08, 0x09, 0x0A]);
        assert!(chain.roles.is_used_as_slave);
    }
}
