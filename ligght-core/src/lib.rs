//! Board-agnostic core logic for the traffic light firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Program tables (the repeating light schedule) and step resolution
//! - Bus dispatcher splitting main/side street payloads over the chain
//! - Operating mode state machine
//! - Sequencer tying the clock, the tables and the dispatcher together
//! - Board configuration (addresses, DIP switch decoding)

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod config;
pub mod program;
pub mod sequencer;
pub mod state;
