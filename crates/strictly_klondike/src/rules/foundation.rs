//! Foundation bay rules.

use crate::action::MoveError;
use crate::card::Card;
use crate::pile::{PileId, Table};
use tracing::instrument;

/// Checks that `run` may go onto the bay for `bay`'s suit.
///
/// Bays take a single card of their own suit whose ordinal is one above
/// the bay's top ordinal (0 for an empty bay).
#[instrument(skip(run, table), fields(run_len = run.len()))]
pub fn check_foundation(run: &[Card], bay: PileId, table: &Table) -> Result<(), MoveError> {
    let PileId::Foundation(suit) = bay else {
        return Err(MoveError::NotATarget(bay));
    };
    let card = match run {
        [card] => card,
        [] => return Err(MoveError::NoSelection),
        _ => return Err(MoveError::NotSingleCard(run.len())),
    };

    if card.suit() != suit {
        return Err(MoveError::WrongSuit(*card, bay));
    }
    if card.ordinal() != table.foundation_top_ordinal(suit) + 1 {
        return Err(MoveError::OutOfSequence(*card, bay));
    }
    Ok(())
}

/// Whether `card` is the next card for its own bay.
pub fn accepts_on_foundation(card: &Card, table: &Table) -> bool {
    card.ordinal() == table.foundation_top_ordinal(card.suit()) + 1
}
