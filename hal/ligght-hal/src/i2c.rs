//! I2C bus abstractions
//!
//! The traffic light chain only ever writes to its boards, so the bus
//! trait is reduced to a single write operation. Each call is one complete
//! open/write/close sequence.

use embedded_hal::i2c::{Error as _, ErrorKind, NoAcknowledgeSource};

/// I2C bus master
///
/// Writes are synchronous: when `write` returns, the transmission to
/// `address` has ended (successfully or not) and the bus is free again.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// Nobody acknowledged the address byte
    AddressNack,
    /// Address was acknowledged but a data byte was not
    DataNack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => I2cBusError::AddressNack,
            ErrorKind::NoAcknowledge(_) => I2cBusError::DataNack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// [`I2cBus`] over any `embedded-hal` 1.0 blocking I2C master
///
/// Chip HALs (embassy-rp, rp2040-hal, ...) implement the `embedded-hal`
/// trait; this adapter turns their errors into [`I2cBusError`].
pub struct HalI2cBus<I> {
    inner: I,
}

impl<I: embedded_hal::i2c::I2c> HalI2cBus<I> {
    /// Wrap an I2C master
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Give back the wrapped I2C master
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: embedded_hal::i2c::I2c> I2cBus for HalI2cBus<I> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}
