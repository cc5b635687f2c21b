//! Events that change what the lights show

use super::machine::LightState;
use crate::program::TransitionState;

/// Events delivered to the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Switch to the given mode (console `set_state`)
    SelectMode(LightState),
    /// Show fixed states until replaced (console `set_transition_state`)
    ///
    /// Only honored in [`LightState::Debug`].
    ForceTransition {
        main: TransitionState,
        secondary: TransitionState,
    },
    /// Front panel button was pressed
    ButtonPressed,
}
