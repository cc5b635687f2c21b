//! GPIO pin abstractions
//!
//! The controller only reads pins: four DIP switches select the role of
//! the board and one push button cycles the operating mode.

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// [`InputPin`] over an `embedded-hal` 1.0 input
///
/// A pin that cannot be read is reported as low. On the RP2040 reading a
/// GPIO is infallible, so this only matters for exotic port expanders.
pub struct HalInputPin<P> {
    inner: P,
}

impl<P: embedded_hal::digital::InputPin> HalInputPin<P> {
    /// Wrap an input pin
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: embedded_hal::digital::InputPin> InputPin for HalInputPin<P> {
    fn is_high(&mut self) -> bool {
        self.inner.is_high().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct FixedPin(bool);

    impl ErrorType for FixedPin {
        type Error = Infallible;
    }

    impl embedded_hal::digital::InputPin for FixedPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    #[test]
    fn test_adapter_reads_level() {
        let mut high = HalInputPin::new(FixedPin(true));
        let mut low = HalInputPin::new(FixedPin(false));

        assert!(high.is_high());
        assert!(!high.is_low());
        assert!(low.is_low());
    }
}
