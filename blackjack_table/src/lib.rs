//! # Blackjack Table
//!
//! A shared-table blackjack engine: one authoritative game, any number of
//! connected participants, and a full-state broadcast after every action.
//!
//! ## Architecture
//!
//! The game moves through three phases:
//!
//! - **Lobby**: players join; the first joiner becomes the house
//! - **InProgress**: two cards each, then non-house players hit or stand in
//!   roster order
//! - **Ended**: everyone stands and the winner is resolved against the house
//!
//! ## Core Modules
//!
//! - [`game`]: Cards, scoring, winner resolution and the state reducer
//! - [`table`]: Single-owner actor that serializes actions and fans out state
//! - [`net`]: JSON event envelopes spoken over the WebSocket
//!
//! ## Example
//!
//! ```
//! use blackjack_table::{Action, GameState};
//!
//! let mut rng = rand::rng();
//! let mut game = GameState::new();
//! game.apply(Action::join("p1", "Alice"), &mut rng);
//! game.apply(Action::join("p2", "Bob"), &mut rng);
//! game.apply(Action::Start, &mut rng);
//!
//! assert_eq!(game.current_turn(), Some("p2"));
//! ```

/// Wire protocol for participant connections.
pub mod net;
pub use net::messages;

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Action, GameState, Phase,
    constants::{self, INITIAL_HAND_SIZE, MIN_PLAYERS},
    entities::{self, Card, Deck, Player, PlayerId, Rank, Suit},
    functional,
};

/// The shared table actor.
pub mod table;
