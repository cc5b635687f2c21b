//! Bus dispatcher
//!
//! Turns a main/side street payload pair into writes to the boards of the
//! chain. Boards alternate between the two streams by chain position, so
//! one linear chain can show both directions of a junction. A slave board
//! flips the parity to stay in phase with its master.

use heapless::Vec;
use ligght_hal::I2cBus;

use super::chain::{ChainConfig, MAX_CHAIN_LEN};

/// Dispatch could not be planned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Chain has no boards to write to
    EmptyChain,
}

/// One planned bus write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusWrite<'p> {
    /// Target board address
    pub address: u8,
    /// Bytes to send
    pub payload: &'p [u8],
}

/// Writes in chain order
pub type DispatchPlan<'p> = Vec<BusWrite<'p>, MAX_CHAIN_LEN>;

/// Select which payload goes to which board
///
/// A simple light only has one downstream board, which gets the secondary
/// payload. Otherwise even positions get the main payload on a master and
/// the secondary payload on a slave.
pub fn plan<'p>(
    chain: &ChainConfig,
    main_payload: &'p [u8],
    secondary_payload: &'p [u8],
) -> Result<DispatchPlan<'p>, DispatchError> {
    let first = *chain.addresses.first().ok_or(DispatchError::EmptyChain)?;
    let mut writes = Vec::new();

    if chain.roles.is_simple_traffic_light {
        let _ = writes.push(BusWrite {
            address: first,
            payload: secondary_payload,
        });
        return Ok(writes);
    }

    for (i, &address) in chain.addresses.iter().enumerate() {
        let use_main = (i % 2 == 0) != chain.roles.is_used_as_slave;
        let payload = if use_main {
            main_payload
        } else {
            secondary_payload
        };
        // Plan and chain share the same capacity
        let _ = writes.push(BusWrite { address, payload });
    }

    Ok(writes)
}

/// Outcome of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchReport<E> {
    /// Writes that completed
    pub delivered: u8,
    /// Boards that could not be reached, with the bus error
    pub failures: Vec<(u8, E), MAX_CHAIN_LEN>,
}

impl<E> DispatchReport<E> {
    /// Every planned write went through
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sends payloads down the chain over an I2C bus
///
/// Writes are issued one after the other. A board that fails does not
/// stop the remaining boards from being written.
pub struct BusDispatcher<B> {
    bus: B,
}

impl<B: I2cBus> BusDispatcher<B> {
    /// Create a dispatcher owning the bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Access the underlying bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Plan and transmit one main/secondary pair
    pub fn dispatch(
        &mut self,
        chain: &ChainConfig,
        main_payload: &[u8],
        secondary_payload: &[u8],
    ) -> Result<DispatchReport<B::Error>, DispatchError> {
        let writes = plan(chain, main_payload, secondary_payload)?;

        let mut report = DispatchReport {
            delivered: 0,
            failures: Vec::new(),
        };

        for write in &writes {
            match self.bus.write(write.address, write.payload) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    let _ = report.failures.push((write.address, e));
                }
            }
        }

        Ok(report)
    }
}
