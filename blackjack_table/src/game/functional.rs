//! Pure game functions: deck construction, hand scoring and winner resolution.

use rand::Rng;

use super::entities::{Card, Deck, Player, Rank};

/// Highest hand value that doesn't bust.
pub const BLACKJACK: u32 = 21;

/// Returns a uniformly shuffled copy of `cards` (Fisher–Yates). The input is
/// left untouched.
pub fn shuffle<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Builds a full 52-card deck in random order.
pub fn build_deck<R: Rng + ?Sized>(rng: &mut R) -> Deck {
    Deck::from(shuffle(Deck::ordered().cards(), rng))
}

/// Best blackjack value of a hand. Aces count 11 until the total would bust,
/// then they are demoted to 1 one at a time.
pub fn hand_value(hand: &[Card]) -> u32 {
    let mut total: u32 = hand.iter().map(|card| card.rank.points()).sum();
    let mut soft_aces = hand.iter().filter(|card| card.rank == Rank::Ace).count();
    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    total
}

/// Decides the winner of a settled round.
///
/// When the house busts, the highest non-bust player wins and earlier
/// players keep ties. Otherwise the first non-bust player in roster order
/// who beats the house wins, falling back to the house itself. That second
/// rule takes the first qualifier, not the best one.
pub fn resolve_winner(players: &[Player]) -> Option<Player> {
    let house = players.iter().find(|p| p.is_house)?;
    let mut contenders = players
        .iter()
        .filter(|p| !p.is_house && p.score <= BLACKJACK);

    if house.is_bust() {
        contenders
            .fold(None, |best: Option<&Player>, p| match best {
                Some(b) if p.score <= b.score => Some(b),
                _ => Some(p),
            })
            .cloned()
    } else {
        let winner = contenders
            .find(|p| p.score > house.score)
            .unwrap_or(house);
        Some(winner.clone())
    }
}
