//! Bus payload encoding
//!
//! Payloads are postcard-encoded so a relay board running the same
//! firmware can decode exactly what its master sent.

use heapless::Vec;
use ligght_core::program::TransitionState;
use serde::{Deserialize, Serialize};

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 8;

/// Encoded message ready for the bus
pub type Payload = Vec<u8, MAX_PAYLOAD_SIZE>;

/// Messages sent to LED boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightMessage {
    /// Show this state on all lamps of the board
    Transition(TransitionState),
}

/// Errors that can occur during payload encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Message does not fit into [`MAX_PAYLOAD_SIZE`]
    TooLarge,
    /// Bytes are not a valid message
    InvalidMessage,
}

/// Encode a message
pub fn encode(message: &LightMessage) -> Result<Payload, PayloadError> {
    let mut buf = [0u8; MAX_PAYLOAD_SIZE];
    let used = postcard::to_slice(message, &mut buf).map_err(|_| PayloadError::TooLarge)?;
    Payload::from_slice(used).map_err(|_| PayloadError::TooLarge)
}

/// Encode the payload for one stream
pub fn encode_transition(state: TransitionState) -> Result<Payload, PayloadError> {
    encode(&LightMessage::Transition(state))
}

/// Decode a payload received from the bus
pub fn decode(bytes: &[u8]) -> Result<LightMessage, PayloadError> {
    postcard::from_bytes(bytes).map_err(|_| PayloadError::InvalidMessage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_bytes() {
        // Variant index of the message, then of the state
        assert_eq!(encode_transition(TransitionState::None).unwrap().as_slice(), &[0, 0]);
        assert_eq!(encode_transition(TransitionState::Red).unwrap().as_slice(), &[0, 3]);
        assert_eq!(
            encode_transition(TransitionState::RedYellow).unwrap().as_slice(),
            &[0, 4]
        );
    }

    #[test]
    fn test_decode_what_master_sends() {
        let payload = encode_transition(TransitionState::Yellow).unwrap();
        assert_eq!(
            decode(&payload),
            Ok(LightMessage::Transition(TransitionState::Yellow))
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode(&[]), Err(PayloadError::InvalidMessage));
        assert_eq!(decode(&[0, 9]), Err(PayloadError::InvalidMessage));
        assert_eq!(decode(&[1, 0]), Err(PayloadError::InvalidMessage));
    }
}
