//! Inter-task communication channels
//!
//! Static channels shared between the Embassy tasks.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;

use ligght_core::state::{Event, LightState};

/// Channel capacity for sequencer events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Events from the console and the mode button
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Mode last applied by the controller
pub static CURRENT_MODE: Mutex<CriticalSectionRawMutex, Cell<LightState>> =
    Mutex::new(Cell::new(LightState::Off));

/// Read the mode published by the controller
pub fn current_mode() -> LightState {
    CURRENT_MODE.lock(|mode| mode.get())
}

/// Publish the active mode
pub fn publish_mode(mode: LightState) {
    CURRENT_MODE.lock(|cell| cell.set(mode));
}
