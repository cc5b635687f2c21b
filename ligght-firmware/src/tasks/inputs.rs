//! Mode button task
//!
//! The button is active low. A press is reported once per
//! unpressed-to-pressed edge.

use defmt::*;
use embassy_time::{Duration, Ticker};

use ligght_core::state::{ButtonState, Event};
use ligght_hal::InputPin;

use crate::channels::EVENT_CHANNEL;

/// Poll period, long enough to ride out contact bounce
const BUTTON_POLL_MS: u64 = 20;

/// Button task - emits [`Event::ButtonPressed`] on each press
#[embassy_executor::task]
pub async fn button_task(mut button: crate::ButtonPin) {
    info!("Button task started");

    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_POLL_MS));
    let mut previous = ButtonState::from_level(button.is_high());

    loop {
        ticker.next().await;

        let state = ButtonState::from_level(button.is_high());
        if state.is_press_from(previous) {
            debug!("Mode button pressed");
            if EVENT_CHANNEL.try_send(Event::ButtonPressed).is_err() {
                warn!("Event channel full, dropping button press");
            }
        }
        previous = state;
    }
}
