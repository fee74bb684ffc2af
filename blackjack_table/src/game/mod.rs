//! Blackjack game engine - deck, scoring and the table state machine.
//!
//! This module provides:
//! - Card, deck and player entities with their wire formats
//! - Pure functions for shuffling, hand scoring and winner resolution
//! - The [`GameState`] reducer that applies player actions

pub mod constants;
pub mod entities;
pub mod functional;
pub mod state_machine;

pub use state_machine::{Action, GameState, Phase};
