//! Operating mode state machine
//!
//! The mode decides which program table drives the lights. Mode changes
//! come from the serial console and the front panel button.

use super::events::Event;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operating mode of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LightState {
    /// All lights dark
    #[default]
    Off,
    /// Blinking yellow
    Maintenance,
    /// Regular program for the fixture kind
    On,
    /// Transition states are set by hand from the console
    Debug,
}

impl LightState {
    /// Parse the numeric code used on the serial console (0-3)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::Maintenance),
            2 => Some(Self::On),
            3 => Some(Self::Debug),
            _ => None,
        }
    }

    /// Numeric console code
    pub fn code(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Maintenance => 1,
            Self::On => 2,
            Self::Debug => 3,
        }
    }

    /// Accepts forced transition states
    pub fn accepts_forced_transitions(&self) -> bool {
        matches!(self, LightState::Debug)
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: Event) -> Self {
        use LightState::*;

        match (self, event) {
            (_, Event::SelectMode(mode)) => mode,

            // Front panel button cycles through the automatic modes
            (Off, Event::ButtonPressed) => On,
            (On, Event::ButtonPressed) => Maintenance,
            (Maintenance, Event::ButtonPressed) => Off,
            (Debug, Event::ButtonPressed) => Off,

            // Forcing a transition never changes the mode
            (_, Event::ForceTransition { .. }) => self,
        }
    }
}

/// Physical state of a push button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    Pressed,
    #[default]
    Unpressed,
}

impl ButtonState {
    /// Decode a pin level; the button pulls the pin low when pressed
    pub fn from_level(is_high: bool) -> Self {
        if is_high {
            ButtonState::Unpressed
        } else {
            ButtonState::Pressed
        }
    }

    /// True on the unpressed-to-pressed edge
    pub fn is_press_from(self, previous: ButtonState) -> bool {
        self == ButtonState::Pressed && previous == ButtonState::Unpressed
    }
}
