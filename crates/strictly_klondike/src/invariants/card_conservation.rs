//! Card conservation: the table always holds each of the 52 cards once.

use super::Invariant;
use crate::card::DECK_SIZE;
use crate::engine::GameState;
use std::collections::HashSet;

/// Invariant: exactly 52 distinct cards across all ten piles.
///
/// Moves relocate cards; they never create, drop or duplicate one.
pub struct CardConservationInvariant;

impl Invariant<GameState> for CardConservationInvariant {
    fn holds(game: &GameState) -> bool {
        let table = game.table();
        if table.card_count() != DECK_SIZE {
            return false;
        }
        let distinct: HashSet<_> = table
            .cards()
            .map(|(_, card)| (card.suit(), card.rank()))
            .collect();
        distinct.len() == DECK_SIZE
    }

    fn description() -> &'static str {
        "Table holds each of the 52 cards exactly once"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::deck::Deck;
    use crate::pile::PileId;
    use crate::setup::deal;

    #[test]
    fn test_new_game_holds() {
        assert!(CardConservationInvariant::holds(&GameState::new(Deck::new())));
    }

    #[test]
    fn test_missing_card_violates() {
        let mut table = deal(Deck::new());
        table.pile_mut(PileId::Stock).pop();
        assert!(!CardConservationInvariant::holds(&GameState::from_table(table)));
    }

    #[test]
    fn test_swapped_duplicate_violates() {
        let mut table = deal(Deck::new());
        table.pile_mut(PileId::Stock).pop();
        let existing = *table.tableau()[0].cards().first().expect("dealt card");
        table.pile_mut(PileId::Stock).push(Card::new(existing.suit(), existing.rank()));
        assert_eq!(table.card_count(), DECK_SIZE);
        assert!(!CardConservationInvariant::holds(&GameState::from_table(table)));
    }
}
