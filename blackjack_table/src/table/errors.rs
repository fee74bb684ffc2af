//! Table actor error types.

use thiserror::Error;

/// Errors returned by [`super::TableHandle`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The actor has stopped and its inbox is gone
    #[error("Table is closed")]
    Closed,

    /// The actor dropped the reply channel without answering
    #[error("Table did not respond")]
    NoResponse,
}
