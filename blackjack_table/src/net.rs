//! Wire protocol spoken over each participant's WebSocket.
//!
//! Every text frame is a JSON envelope `{"event": <name>, "data": <payload>}`.

/// Protocol error types.
pub mod errors;

/// Inbound and outbound event envelopes.
pub mod messages;
