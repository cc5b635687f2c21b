//! Ligght Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the traffic light
//! logic needs. Chip-specific code only has to provide an `embedded-hal`
//! 1.0 implementation; the adapters in this crate do the rest.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (ligght-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ligght-core (sequencer, dispatcher)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ligght-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal 1.0 (embassy-rp, ...)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - DIP switches and the mode button
//! - [`i2c::I2cBus`] - Writes to the boards in the chain

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use gpio::{HalInputPin, InputPin};
pub use i2c::{HalI2cBus, I2cBus, I2cBusError};
