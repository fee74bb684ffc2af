//! Blackjack table state machine.
//!
//! A single [`GameState`] moves through three phases:
//!
//! - **Lobby**: players join, nothing has been dealt
//! - **InProgress**: cards are dealt and non-house players take turns
//! - **Ended**: everyone stands and a winner is fixed
//!
//! [`GameState::apply`] is the only way actions change the state. Actions
//! that don't meet their preconditions are ignored rather than rejected, so
//! callers always broadcast whatever state results.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::{INITIAL_HAND_SIZE, MIN_PLAYERS};
use super::entities::{Deck, Player, PlayerId};
use super::functional::{build_deck, resolve_winner};

/// Inbound player action, tagged by `type` on the wire.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE", rename_all_fields = "camelCase")]
pub enum Action {
    Join {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_id: Option<PlayerId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_name: Option<String>,
    },
    Start,
    Hit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_id: Option<PlayerId>,
    },
    Stand {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_id: Option<PlayerId>,
    },
    Reset,
    /// Any action type this table doesn't know about.
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn join(player_id: &str, player_name: &str) -> Self {
        Self::Join {
            player_id: Some(player_id.to_string()),
            player_name: Some(player_name.to_string()),
        }
    }

    pub fn hit(player_id: &str) -> Self {
        Self::Hit {
            player_id: Some(player_id.to_string()),
        }
    }

    pub fn stand(player_id: &str) -> Self {
        Self::Stand {
            player_id: Some(player_id.to_string()),
        }
    }

    /// Decodes an action payload. Payloads that don't decode into a known
    /// action become [`Action::Unknown`] instead of an error.
    pub fn from_payload(payload: serde_json::Value) -> Self {
        serde_json::from_value(payload).unwrap_or_else(|e| {
            debug!("undecodable action payload: {e}");
            Self::Unknown
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Join { .. } => "join",
            Self::Start => "start",
            Self::Hit { .. } => "hit",
            Self::Stand { .. } => "stand",
            Self::Reset => "reset",
            Self::Unknown => "unknown",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Lobby,
    InProgress,
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Lobby => "lobby",
            Self::InProgress => "in progress",
            Self::Ended => "ended",
        };
        write!(f, "{repr}")
    }
}

/// The one authoritative game. Serializes to the snapshot clients render.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    players: Vec<Player>,
    deck: Deck,
    #[serde(with = "empty_turn")]
    current_turn: Option<PlayerId>,
    game_started: bool,
    game_ended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winner: Option<Player>,
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// First player with the given id. Ids aren't deduplicated on join.
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current_turn(&self) -> Option<&str> {
        self.current_turn.as_deref()
    }

    pub fn game_started(&self) -> bool {
        self.game_started
    }

    pub fn game_ended(&self) -> bool {
        self.game_ended
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match (self.game_started, self.game_ended) {
            (false, _) => Phase::Lobby,
            (true, false) => Phase::InProgress,
            (true, true) => Phase::Ended,
        }
    }

    /// Applies one action. Returns whether anything changed; the caller
    /// broadcasts either way.
    pub fn apply<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> bool {
        match action {
            Action::Join {
                player_id,
                player_name,
            } => self.join(player_id, player_name),
            Action::Start => self.start(rng),
            Action::Hit { player_id } => self.hit(player_id.as_deref()),
            Action::Stand { player_id } => self.stand(player_id.as_deref()),
            Action::Reset => {
                *self = Self::default();
                true
            }
            Action::Unknown => false,
        }
    }

    /// Removes every player with the given id and returns how many were
    /// removed. The turn pointer is left alone even if it named one of them.
    pub fn remove_players(&mut self, id: &str) -> usize {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        before - self.players.len()
    }

    fn join(&mut self, player_id: Option<PlayerId>, player_name: Option<String>) -> bool {
        let (Some(id), Some(name)) = (
            player_id.filter(|id| !id.is_empty()),
            player_name.filter(|name| !name.is_empty()),
        ) else {
            return false;
        };

        let is_house = self.players.is_empty();
        self.players.push(Player::new(id, name, is_house));
        true
    }

    fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.phase() != Phase::Lobby || self.players.len() < MIN_PLAYERS {
            return false;
        }

        self.deck = build_deck(rng);
        for player in &mut self.players {
            player.hand.clear();
            for _ in 0..INITIAL_HAND_SIZE {
                if let Some(card) = self.deck.draw() {
                    player.receive(card);
                }
            }
        }

        self.game_started = true;
        self.current_turn = self
            .players
            .iter()
            .find(|p| !p.is_house)
            .map(|p| p.id.clone());
        true
    }

    /// Deals one card to the turn holder. A bust stands the player, and when
    /// that leaves nobody to act the round settles just as a final STAND would.
    fn hit(&mut self, player_id: Option<&str>) -> bool {
        let Some(idx) = self.turn_holder(player_id) else {
            return false;
        };
        if self.players[idx].is_standing {
            return false;
        }
        let Some(card) = self.deck.draw() else {
            return false;
        };

        let player = &mut self.players[idx];
        player.receive(card);
        if player.is_bust() {
            player.is_standing = true;
            let id = player.id.clone();
            self.advance_turn(&id);
        }
        true
    }

    fn stand(&mut self, player_id: Option<&str>) -> bool {
        let Some(idx) = self.turn_holder(player_id) else {
            return false;
        };

        let player = &mut self.players[idx];
        player.is_standing = true;
        let id = player.id.clone();
        self.advance_turn(&id);
        true
    }

    /// Index of the acting player, if `player_id` holds the turn of a game
    /// in progress.
    fn turn_holder(&self, player_id: Option<&str>) -> Option<usize> {
        if self.phase() != Phase::InProgress {
            return None;
        }
        let id = player_id?;
        if self.current_turn.as_deref() != Some(id) {
            return None;
        }
        self.players.iter().position(|p| p.id == id)
    }

    /// Hands the turn to the next non-standing, non-house player in roster
    /// order. The house never acts; when nobody is left the round settles.
    fn advance_turn(&mut self, finished: &str) {
        let next = self
            .players
            .iter()
            .find(|p| !p.is_standing && !p.is_house && p.id != finished)
            .map(|p| p.id.clone());

        match next {
            Some(id) => self.current_turn = Some(id),
            None => self.settle(),
        }
    }

    fn settle(&mut self) {
        self.current_turn = None;
        // The house stands on the hand it was dealt.
        for house in self.players.iter_mut().filter(|p| p.is_house) {
            house.is_standing = true;
        }
        self.game_ended = true;
        self.winner = resolve_winner(&self.players);
    }
}

/// Wire form of the turn pointer: the empty string means nobody.
mod empty_turn {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::game::entities::PlayerId;

    pub fn serialize<S>(turn: &Option<PlayerId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(turn.as_deref().unwrap_or_default())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PlayerId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let turn = String::deserialize(deserializer)?;
        Ok(Some(turn).filter(|t| !t.is_empty()))
    }
}
