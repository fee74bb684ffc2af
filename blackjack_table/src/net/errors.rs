//! Protocol error types for encoding and decoding event envelopes.

use thiserror::Error;

/// Errors that can occur while moving events across the wire
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame wasn't a valid event envelope
    #[error("malformed event envelope: {0}")]
    Decode(#[source] serde_json::Error),

    /// An outbound event couldn't be serialized
    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
