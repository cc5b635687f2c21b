//! Step sequencer
//!
//! Resolves the active program step on every tick and reports step
//! changes for dispatch.

pub mod runner;

pub use runner::{Sequencer, SequencerError, StepOutput};
