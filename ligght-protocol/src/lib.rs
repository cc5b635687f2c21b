//! Ligght wire and console protocol
//!
//! Two small protocols meet at the controller board:
//!
//! - **Bus payloads** sent to the LED boards over I2C. Each payload is a
//!   postcard-encoded [`LightMessage`], at most [`MAX_PAYLOAD_SIZE`] bytes.
//! - **Console commands** typed on the USB serial console, one per line:
//!
//! ```text
//! help
//! version
//! set_state <0-3>                       0:Off 1:Maintenance 2:On 3:Debug
//! set_transition_state <0-4> [<0-4>]    0:None 1:Green 2:Yellow 3:Red 4:RedYellow
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod payload;
pub mod text;

pub use command::{CommandError, CommandReader, ConsoleCommand, MAX_LINE_LEN};
pub use payload::{
    decode, encode, encode_transition, LightMessage, Payload, PayloadError, MAX_PAYLOAD_SIZE,
};
pub use text::{version_info, BUILD, HELP_TEXT, VERSION};
