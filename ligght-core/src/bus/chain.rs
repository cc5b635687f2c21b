//! Chain configuration
//!
//! Describes which boards this controller talks to and in which role.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum boards in one chain
pub const MAX_CHAIN_LEN: usize = 8;

/// Role of this controller, read from the DIP switches at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoleFlags {
    /// Fixture has a single stream (pedestrian light) instead of a junction
    pub is_simple_traffic_light: bool,
    /// Board relays a master's state instead of being the timing authority
    pub is_used_as_slave: bool,
}

impl RoleFlags {
    /// Master driving a four-way junction
    pub const JUNCTION_MASTER: Self = Self {
        is_simple_traffic_light: false,
        is_used_as_slave: false,
    };

    pub const fn new(is_simple_traffic_light: bool, is_used_as_slave: bool) -> Self {
        Self {
            is_simple_traffic_light,
            is_used_as_slave,
        }
    }
}

/// Ordered board addresses plus the role of this controller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainConfig {
    /// 7-bit I2C addresses in chain order
    pub addresses: Vec<u8, MAX_CHAIN_LEN>,
    /// Role flags
    pub roles: RoleFlags,
}

impl ChainConfig {
    /// Build a chain from a list of addresses
    ///
    /// Addresses beyond [`MAX_CHAIN_LEN`] are dropped.
    pub fn new(addresses: &[u8], roles: RoleFlags) -> Self {
        let count = addresses.len().min(MAX_CHAIN_LEN);
        Self {
            // Cannot fail: count is capped at the capacity
            addresses: Vec::from_slice(&addresses[..count]).unwrap_or_default(),
            roles,
        }
    }

    /// Number of boards
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// No boards reachable
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
