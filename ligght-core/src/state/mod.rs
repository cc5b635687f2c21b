//! Operating mode state machine
//!
//! The mode is explicit, finite and deterministic: a function of the
//! previous mode and one event.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ButtonState, LightState};
