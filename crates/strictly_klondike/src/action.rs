//! First-class move records for Klondike.
//!
//! A [`Move`] is the unit of history: one player turn, recorded after it
//! succeeds and replayed or reversed later. It does not store card
//! identities; the moved cards are always the top `count` cards of the
//! destination right after the move.

use crate::card::Card;
use crate::pile::PileId;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// What kind of transition a move records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// One card from stock to waste, turned face-up.
    #[display("draw")]
    Draw,
    /// The whole waste turned back onto the stock face-down, reversed.
    #[display("refill")]
    StockRefill,
    /// A card or run moved onto a tableau stack or a foundation bay.
    #[display("move")]
    Standard,
}

/// A recorded player turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    kind: MoveKind,
    source: PileId,
    destination: PileId,
    count: usize,
    flip_needed: bool,
}

impl Move {
    /// A single stock-to-waste draw.
    pub fn draw() -> Self {
        Self {
            kind: MoveKind::Draw,
            source: PileId::Stock,
            destination: PileId::Waste,
            count: 1,
            flip_needed: false,
        }
    }

    /// The waste of `count` cards turned back onto the stock.
    pub fn stock_refill(count: usize) -> Self {
        Self {
            kind: MoveKind::StockRefill,
            source: PileId::Waste,
            destination: PileId::Stock,
            count,
            flip_needed: false,
        }
    }

    /// A run of `count` cards moved between piles.
    ///
    /// `flip_needed` records that the card left exposed on `source` was
    /// face-down and got turned over.
    pub fn standard(source: PileId, destination: PileId, count: usize, flip_needed: bool) -> Self {
        Self {
            kind: MoveKind::Standard,
            source,
            destination,
            count,
            flip_needed,
        }
    }

    /// Returns the kind.
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Pile the cards came from.
    pub fn source(&self) -> PileId {
        self.source
    }

    /// Pile the cards went to.
    pub fn destination(&self) -> PileId {
        self.destination
    }

    /// Number of cards moved.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the move exposed and flipped a face-down card on its source.
    pub fn flip_needed(&self) -> bool {
        self.flip_needed
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            MoveKind::Draw => write!(f, "draw"),
            MoveKind::StockRefill => write!(f, "refill stock with {} cards", self.count),
            MoveKind::Standard => {
                write!(f, "{} card(s) {} -> {}", self.count, self.source, self.destination)?;
                if self.flip_needed {
                    write!(f, " (flip)")?;
                }
                Ok(())
            }
        }
    }
}

/// Reasons a move is rejected.
///
/// Every variant is an illegal move: the selection is cleared and the
/// table is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// A target was given but nothing is selected.
    #[display("No card is selected")]
    NoSelection,

    /// The card cannot be picked up.
    #[display("{} in {} cannot be selected", _0, _1)]
    NotSelectable(Card, PileId),

    /// There is no card at that position.
    #[display("No card at position {} of {}", _1, _0)]
    NoCard(PileId, usize),

    /// The pile id does not exist on the table.
    #[display("No such pile: {}", _0)]
    UnknownPile(#[error(not(source))] PileId),

    /// A pile that can never receive cards from play.
    #[display("Cards cannot be moved onto {}", _0)]
    NotATarget(#[error(not(source))] PileId),

    /// Target is the pile the selection came from.
    #[display("Cannot move {} onto itself", _0)]
    SamePile(#[error(not(source))] PileId),

    /// Non-empty target expected.
    #[display("{} is empty", _0)]
    EmptyTarget(#[error(not(source))] PileId),

    /// Empty target expected.
    #[display("{} is not empty", _0)]
    OccupiedTarget(#[error(not(source))] PileId),

    /// The target card is face-down.
    #[display("Target card on {} is face-down", _0)]
    TargetFaceDown(#[error(not(source))] PileId),

    /// Same colour on a tableau stack.
    #[display("{} cannot go on {}: colours must alternate", _0, _1)]
    SameColor(Card, Card),

    /// Tableau rank not exactly one lower.
    #[display("{} cannot go on {}: rank must be one lower", _0, _1)]
    NotOneLower(Card, Card),

    /// Only Kings start an empty stack.
    #[display("Only a King may start an empty stack, not {}", _0)]
    NotAKing(#[error(not(source))] Card),

    /// Foundations take one card at a time.
    #[display("Only a single card may go to a foundation, not {}", _0)]
    NotSingleCard(#[error(not(source))] usize),

    /// Wrong suit for the bay.
    #[display("{} does not belong on {}", _0, _1)]
    WrongSuit(Card, PileId),

    /// Foundation rank not exactly one higher.
    #[display("{} does not follow the top of {}", _0, _1)]
    OutOfSequence(Card, PileId),

    /// No bay accepts the card.
    #[display("No foundation accepts {}", _0)]
    NoFoundation(#[error(not(source))] Card),

    /// Stock and waste are both empty.
    #[display("Nothing left to draw")]
    NothingToDraw,
}

/// Reasons an undo cannot happen.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum UndoError {
    /// No move has been recorded.
    #[display("You are at the start of the game.")]
    EmptyHistory,

    /// The last move does not fit the table (history and table disagree).
    #[display("Cannot undo {}: {} holds too few cards", _0, _1)]
    Inconsistent(Move, PileId),
}
