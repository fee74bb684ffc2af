/// Players required before a game can start.
pub const MIN_PLAYERS: usize = 2;

/// Cards dealt to every player at the start of a game.
pub const INITIAL_HAND_SIZE: usize = 2;
