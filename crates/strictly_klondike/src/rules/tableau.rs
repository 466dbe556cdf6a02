//! Tableau stacking rules.

use crate::action::MoveError;
use crate::card::{Card, Rank};
use crate::pile::{Pile, PileId};
use tracing::instrument;

/// Checks that `run` may be placed on the non-empty stack `target`.
///
/// The run's bottom card must be the opposite colour of the target's top
/// card and exactly one rank lower.
#[instrument(skip(run, target), fields(run_len = run.len()))]
pub fn check_tableau(run: &[Card], target_id: PileId, target: &Pile) -> Result<(), MoveError> {
    let bottom = run.first().ok_or(MoveError::NoSelection)?;
    let top = target.top().ok_or(MoveError::EmptyTarget(target_id))?;

    if !top.is_face_up() {
        return Err(MoveError::TargetFaceDown(target_id));
    }
    if bottom.color() == top.color() {
        return Err(MoveError::SameColor(*bottom, *top));
    }
    if bottom.ordinal() + 1 != top.ordinal() {
        return Err(MoveError::NotOneLower(*bottom, *top));
    }
    Ok(())
}

/// Checks that `run` may start the empty stack `target`: only a King may.
#[instrument(skip(run, target), fields(run_len = run.len()))]
pub fn check_empty_tableau(run: &[Card], target_id: PileId, target: &Pile) -> Result<(), MoveError> {
    let bottom = run.first().ok_or(MoveError::NoSelection)?;

    if !target.is_empty() {
        return Err(MoveError::OccupiedTarget(target_id));
    }
    if bottom.rank() != Rank::King {
        return Err(MoveError::NotAKing(*bottom));
    }
    Ok(())
}

/// Whether `cards` (bottom first) are face-up, alternate colour and
/// descend by exactly one.
pub fn is_valid_run(cards: &[Card]) -> bool {
    cards.iter().all(Card::is_face_up)
        && cards.windows(2).all(|pair| {
            pair[0].color() != pair[1].color() && pair[0].ordinal() == pair[1].ordinal() + 1
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn up(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank).face_up()
    }

    fn stack_with(card: Card) -> Pile {
        let mut pile = Pile::new();
        pile.push(card);
        pile
    }

    #[test]
    fn test_red_eight_on_black_nine() {
        let target = stack_with(up(Suit::Spade, Rank::Nine));
        let run = [up(Suit::Heart, Rank::Eight)];
        assert!(check_tableau(&run, PileId::Tableau(0), &target).is_ok());
    }

    #[test]
    fn test_black_eight_on_black_nine() {
        let target = stack_with(up(Suit::Spade, Rank::Nine));
        let run = [up(Suit::Club, Rank::Eight)];
        assert!(matches!(
            check_tableau(&run, PileId::Tableau(0), &target),
            Err(MoveError::SameColor(_, _))
        ));
    }

    #[test]
    fn test_red_seven_on_black_nine() {
        let target = stack_with(up(Suit::Spade, Rank::Nine));
        let run = [up(Suit::Diamond, Rank::Seven)];
        assert!(matches!(
            check_tableau(&run, PileId::Tableau(0), &target),
            Err(MoveError::NotOneLower(_, _))
        ));
    }

    #[test]
    fn test_face_down_target() {
        let target = stack_with(Card::new(Suit::Spade, Rank::Nine));
        let run = [up(Suit::Heart, Rank::Eight)];
        assert_eq!(
            check_tableau(&run, PileId::Tableau(2), &target),
            Err(MoveError::TargetFaceDown(PileId::Tableau(2)))
        );
    }

    #[test]
    fn test_only_king_on_empty() {
        let empty = Pile::new();
        let king = [up(Suit::Club, Rank::King), up(Suit::Heart, Rank::Queen)];
        let queen = [up(Suit::Heart, Rank::Queen)];
        assert!(check_empty_tableau(&king, PileId::Tableau(4), &empty).is_ok());
        assert!(matches!(
            check_empty_tableau(&queen, PileId::Tableau(4), &empty),
            Err(MoveError::NotAKing(_))
        ));
    }

    #[test]
    fn test_valid_run() {
        assert!(is_valid_run(&[
            up(Suit::Spade, Rank::Ten),
            up(Suit::Diamond, Rank::Nine),
            up(Suit::Club, Rank::Eight),
        ]));
        assert!(!is_valid_run(&[up(Suit::Spade, Rank::Ten), up(Suit::Club, Rank::Nine)]));
        assert!(!is_valid_run(&[up(Suit::Spade, Rank::Ten), Card::new(Suit::Heart, Rank::Nine)]));
        assert!(is_valid_run(&[]));
    }
}
