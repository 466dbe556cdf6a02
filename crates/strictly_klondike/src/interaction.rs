//! Pointer semantics: what clicking, double-clicking and dragging mean.
//!
//! These functions translate raw gestures on cards and piles into engine
//! operations. They hold no state of their own; the selection lives in
//! [`GameState`].

use crate::action::{Move, MoveError};
use crate::engine::GameState;
use crate::pile::PileId;
use crate::selection::Selection;
use derive_more::Display;
use tracing::{debug, instrument};

/// Outcome of one gesture.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Interaction {
    /// Cards were picked up.
    #[display("selected {} card(s) from {}", _0.count(), _0.source())]
    Selected(Selection),
    /// The selection was dropped.
    #[display("selection cleared")]
    Deselected,
    /// A move was played.
    #[display("{}", _0)]
    Moved(Move),
    /// The gesture asked for an illegal move.
    #[display("{}", _0)]
    Rejected(MoveError),
    /// The gesture means nothing here.
    #[display("nothing to do")]
    Ignored,
}

impl Interaction {
    fn from_move(result: Result<Move, MoveError>) -> Self {
        match result {
            Ok(mv) => Interaction::Moved(mv),
            Err(err) => Interaction::Rejected(err),
        }
    }
}

/// Click on the card at `index` (0 = bottom) of `pile`.
#[instrument(skip(game))]
pub fn click_card(game: &mut GameState, pile: PileId, index: usize) -> Interaction {
    match pile {
        PileId::Stock | PileId::Foundation(_) => return click_pile(game, pile),
        PileId::Waste | PileId::Tableau(_) => {}
    }
    if !game.table().contains(pile) {
        return Interaction::Rejected(MoveError::UnknownPile(pile));
    }

    let len = game.table().pile(pile).len();
    let Some(card) = game.table().pile(pile).get(index).copied() else {
        return Interaction::Rejected(MoveError::NoCard(pile, index));
    };
    if !card.is_face_up() {
        debug!(%card, "Face-down card ignored");
        return Interaction::Ignored;
    }

    let Some(selection) = game.selection() else {
        return match game.select(pile, index) {
            Ok(selection) => Interaction::Selected(selection),
            Err(err) => Interaction::Rejected(err),
        };
    };

    if selection.covers(pile, index, len) || pile == PileId::Waste {
        game.clear_selection();
        return Interaction::Deselected;
    }

    let PileId::Tableau(stack) = pile else {
        return Interaction::Ignored;
    };
    if index + 1 != len {
        game.clear_selection();
        return Interaction::Rejected(MoveError::NotATarget(pile));
    }
    Interaction::from_move(game.try_move_to_tableau(stack))
}

/// Click on a pile itself rather than one of its cards (an empty slot, the
/// stock, or a foundation bay).
#[instrument(skip(game))]
pub fn click_pile(game: &mut GameState, pile: PileId) -> Interaction {
    match pile {
        PileId::Stock => Interaction::from_move(game.draw_from_stock()),
        PileId::Foundation(suit) if game.selection().is_some() => {
            Interaction::from_move(game.try_move_to_foundation(suit))
        }
        PileId::Tableau(stack)
            if game.selection().is_some()
                && game.table().contains(pile)
                && game.table().pile(pile).is_empty() =>
        {
            Interaction::from_move(game.try_move_to_empty_tableau(stack))
        }
        _ => Interaction::Ignored,
    }
}

/// Double-click: send the card home if a foundation takes it.
#[instrument(skip(game))]
pub fn double_click(game: &mut GameState, pile: PileId, index: usize) -> Interaction {
    Interaction::from_move(game.auto_move_to_foundation(pile, index))
}

/// Start dragging the card at `index` of `pile`, replacing any selection.
#[instrument(skip(game))]
pub fn drag_start(game: &mut GameState, pile: PileId, index: usize) -> Interaction {
    match game.select(pile, index) {
        Ok(selection) => Interaction::Selected(selection),
        Err(err) => Interaction::Rejected(err),
    }
}

/// Drop the dragged cards on `target`: a card when `index` is given,
/// otherwise the pile itself. The selection never outlives the drop.
#[instrument(skip(game))]
pub fn drop_on(game: &mut GameState, target: PileId, index: Option<usize>) -> Interaction {
    let result = match index {
        Some(index) => click_card(game, target, index),
        None => click_pile(game, target),
    };
    game.clear_selection();
    match result {
        Interaction::Selected(_) => Interaction::Ignored,
        other => other,
    }
}
