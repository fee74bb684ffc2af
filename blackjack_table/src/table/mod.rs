//! Table module providing the single shared blackjack table.
//!
//! This module implements:
//! - TableActor: async actor that owns the one [`GameState`](crate::GameState)
//! - TableHandle: cloneable sender used by every connection
//! - Message-based communication with tokio channels
//!
//! ## Architecture
//!
//! The table runs in its own Tokio task with an mpsc message inbox. Each
//! message is handled to completion, including the broadcast that follows
//! it, before the next one is read. That gives every action exclusive access
//! to the game state without any locking.
//!
//! ## Example
//!
//! ```no_run
//! use blackjack_table::table::{TableActor, TableConfig};
//!
//! # async fn example() -> Result<(), blackjack_table::table::TableError> {
//! let (actor, handle) = TableActor::new(TableConfig::default());
//! tokio::spawn(actor.run());
//!
//! let state = handle.state().await?;
//! assert!(state.players().is_empty());
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod messages;

pub use actor::{TableActor, TableHandle};
pub use config::TableConfig;
pub use errors::TableError;
pub use messages::{ConnectionId, TableMessage, TableStats};
