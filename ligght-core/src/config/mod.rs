//! Configuration types
//!
//! Board configuration and its TOML representation.

pub mod hardware;
pub mod toml;

pub use hardware::*;
pub use toml::{parse_config, ConfigError};
