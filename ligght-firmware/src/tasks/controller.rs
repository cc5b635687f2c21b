//! Main controller task
//!
//! Owns the sequencer and the bus dispatcher. Events from the console and
//! the button change the mode; ticks advance the schedule and push every
//! new step down the chain.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;

use ligght_core::bus::{BusDispatcher, ChainConfig};
use ligght_core::sequencer::{Sequencer, StepOutput};
use ligght_hal::HalI2cBus;
use ligght_protocol::encode_transition;

use crate::channels::{publish_mode, EVENT_CHANNEL};
use crate::tasks::tick::TICK_SIGNAL;

/// I2C bus to the LED boards
pub type LedBus = HalI2cBus<I2c<'static, I2C0, Blocking>>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(
    mut sequencer: Sequencer<'static>,
    mut dispatcher: BusDispatcher<LedBus>,
    chain: ChainConfig,
) {
    info!(
        "Controller task started: {} boards, mode {:?}",
        chain.len(),
        sequencer.mode()
    );
    publish_mode(sequencer.mode());

    loop {
        match select(EVENT_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(event) => {
                debug!("Event: {:?}", event);
                match sequencer.handle_event(event) {
                    Ok(()) => {
                        info!("Mode: {:?}", sequencer.mode());
                        publish_mode(sequencer.mode());
                    }
                    Err(e) => warn!("Event {:?} rejected: {:?}", event, e),
                }
            }

            Either::Second(now_ms) => {
                if let Some(output) = sequencer.tick(now_ms) {
                    send_step(&mut dispatcher, &chain, &output);
                }
            }
        }
    }
}

/// Encode one step and write it to every board of the chain
fn send_step(dispatcher: &mut BusDispatcher<LedBus>, chain: &ChainConfig, output: &StepOutput) {
    debug!(
        "Step {:?} of {}: main {:?}, secondary {:?}",
        output.index, output.program, output.main, output.secondary
    );

    let (main, secondary) = match (
        encode_transition(output.main),
        encode_transition(output.secondary),
    ) {
        (Ok(main), Ok(secondary)) => (main, secondary),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to encode step: {:?}", e);
            return;
        }
    };

    match dispatcher.dispatch(chain, &main, &secondary) {
        Ok(report) if report.is_complete() => {
            trace!("Delivered to {} boards", report.delivered);
        }
        Ok(report) => {
            for (address, e) in report.failures.iter() {
                warn!("Board {:#x} not reached: {:?}", *address, e);
            }
        }
        Err(e) => warn!("Dispatch skipped: {:?}", e),
    }
}
