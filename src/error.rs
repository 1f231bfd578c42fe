use thiserror::Error;

use crate::types::Peer;

/// The one fallible path this crate exposes: an inbound datagram too short
/// to contain its mandatory header.
///
/// Unrecognized extended tags and out-of-range fields are *not* represented
/// here — per the wire protocol's error taxonomy they are handled silently
/// (tag skipped, field falls back to a default) rather than rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("{peer} packet too short: got {got} bytes, need at least {need}")]
    PacketTooShort {
        peer: Peer,
        got: usize,
        need: usize,
    },
}
