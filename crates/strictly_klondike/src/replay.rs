//! Deterministic replay of a recorded game.
//!
//! A saved game is a deck order plus a [`History`]. Replaying deals the
//! deck again and feeds every recorded move back through the engine's own
//! operations, so a replayed game passes the same rules as a live one.
//!
//! When a recorded move no longer fits the table, replay stops there. The
//! state keeps the prefix that did replay, with a history of exactly that
//! length.

use crate::action::{Move, MoveError, MoveKind};
use crate::deck::Deck;
use crate::engine::GameState;
use crate::history::History;
use crate::pile::PileId;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

/// Reasons a recorded move cannot be replayed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ReplayError {
    /// The engine rejected the recorded move.
    #[display("Move {} ({}) could not be replayed: {}", index + 1, expected, source)]
    Rejected {
        /// Position in the history, 0-based.
        index: usize,
        /// The recorded move.
        expected: Move,
        /// Why the engine refused it.
        source: MoveError,
    },

    /// The engine accepted the move but produced a different record.
    #[display("Move {} replayed as {} instead of {}", index + 1, actual, expected)]
    Mismatch {
        /// Position in the history, 0-based.
        index: usize,
        /// The recorded move.
        expected: Move,
        /// What the engine did.
        actual: Move,
    },
}

impl ReplayError {
    /// Position of the failing move in the history, 0-based.
    pub fn index(&self) -> usize {
        match self {
            ReplayError::Rejected { index, .. } | ReplayError::Mismatch { index, .. } => *index,
        }
    }
}

/// Replays a history one move at a time.
///
/// Used directly when each step should be observable (for an animated
/// reload); [`replay`] runs it to completion.
#[derive(Debug, Clone)]
pub struct Replayer {
    state: GameState,
    moves: Vec<Move>,
    next: usize,
}

impl Replayer {
    /// Deals `deck` and queues `history` for replay.
    #[instrument(skip(deck, history), fields(moves = history.len()))]
    pub fn new(deck: Deck, history: &History) -> Self {
        Self {
            state: GameState::new(deck),
            moves: history.moves().to_vec(),
            next: 0,
        }
    }

    /// The state reached so far.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of moves replayed so far.
    pub fn replayed(&self) -> usize {
        self.next
    }

    /// Number of moves still queued.
    pub fn remaining(&self) -> usize {
        self.moves.len() - self.next
    }

    /// Replays the next queued move.
    ///
    /// Returns `None` once the queue is exhausted. After an error the
    /// queue is dropped and every later call returns `None`.
    #[instrument(skip(self), fields(index = self.next))]
    pub fn step(&mut self) -> Option<Result<Move, ReplayError>> {
        let expected = *self.moves.get(self.next)?;
        let index = self.next;

        let result = match perform(&mut self.state, &expected) {
            Ok(actual) if actual == expected => Ok(actual),
            Ok(actual) => {
                // Keep the state at the replayed prefix.
                if let Err(err) = self.state.undo() {
                    warn!(error = %err, "Could not back out mismatched move");
                }
                Err(ReplayError::Mismatch {
                    index,
                    expected,
                    actual,
                })
            }
            Err(source) => Err(ReplayError::Rejected {
                index,
                expected,
                source,
            }),
        };

        match &result {
            Ok(mv) => {
                self.next += 1;
                debug!(%mv, "Replayed");
            }
            Err(err) => {
                warn!(error = %err, "Replay diverged");
                self.moves.truncate(index);
            }
        }
        Some(result)
    }

    /// Replays everything left and hands back the state.
    ///
    /// The error, if any, describes the first move that failed; the state
    /// holds every move before it.
    pub fn finish(mut self) -> (GameState, Option<ReplayError>) {
        let mut failure = None;
        while let Some(result) = self.step() {
            if let Err(err) = result {
                failure = Some(err);
            }
        }
        (self.state, failure)
    }
}

/// Rebuilds a game from its deck and history.
///
/// # Errors
///
/// Returns [`ReplayError`] at the first move that does not replay. Use
/// [`Replayer::finish`] to keep the partial state instead.
#[instrument(skip(deck, history), fields(moves = history.len()))]
pub fn replay(deck: Deck, history: &History) -> Result<GameState, ReplayError> {
    let (state, failure) = Replayer::new(deck, history).finish();
    match failure {
        Some(err) => Err(err),
        None => {
            info!(moves = state.history().len(), "Replay complete");
            Ok(state)
        }
    }
}

/// Drives the engine through the operation that produces `mv`.
fn perform(state: &mut GameState, mv: &Move) -> Result<Move, MoveError> {
    match mv.kind() {
        MoveKind::Draw | MoveKind::StockRefill => state.draw_from_stock(),
        MoveKind::Standard => {
            let source = mv.source();
            if !state.table().contains(source) {
                return Err(MoveError::UnknownPile(source));
            }
            let len = state.table().pile(source).len();
            let index = len
                .checked_sub(mv.count())
                .ok_or(MoveError::NoCard(source, len))?;
            state.select(source, index)?;

            match mv.destination() {
                PileId::Foundation(suit) => state.try_move_to_foundation(suit),
                PileId::Tableau(stack) if !state.table().contains(mv.destination()) => {
                    state.clear_selection();
                    Err(MoveError::UnknownPile(PileId::Tableau(stack)))
                }
                PileId::Tableau(stack) if state.table().tableau()[stack].is_empty() => {
                    state.try_move_to_empty_tableau(stack)
                }
                PileId::Tableau(stack) => state.try_move_to_tableau(stack),
                other => {
                    state.clear_selection();
                    Err(MoveError::NotATarget(other))
                }
            }
        }
    }
}
