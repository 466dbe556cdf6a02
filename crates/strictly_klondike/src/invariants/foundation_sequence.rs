//! Foundation sequence: each bay is an ascending run of its own suit.

use super::Invariant;
use crate::card::Suit;
use crate::engine::GameState;
use strum::IntoEnumIterator;

/// Invariant: bay `s` holds `A s, 2 s, ...` in order, all face-up.
///
/// The bay's top ordinal therefore always equals its size.
pub struct FoundationSequenceInvariant;

impl Invariant<GameState> for FoundationSequenceInvariant {
    fn holds(game: &GameState) -> bool {
        Suit::iter().all(|suit| {
            game.table()
                .foundation(suit)
                .cards()
                .iter()
                .enumerate()
                .all(|(i, card)| {
                    card.suit() == suit && usize::from(card.ordinal()) == i + 1 && card.is_face_up()
                })
        })
    }

    fn description() -> &'static str {
        "Each foundation holds its own suit from the Ace upward"
    }
}
