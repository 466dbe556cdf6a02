//! Linear move history.

use crate::action::Move;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Append-only log of moves.
///
/// Mutated only by [`History::push`] after a successful move and
/// [`History::pop`] on undo.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    moves: Vec<Move>,
}

/// Error decoding persisted history.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("History is not valid JSON: {}", message)]
pub struct HistoryError {
    /// Parser message.
    pub message: String,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a move.
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Removes and returns the most recent move.
    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    /// The most recent move.
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Number of recorded moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves in the order they were played.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Drops every move after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.moves.truncate(len);
    }

    /// Serializes the log as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if serialization fails.
    #[instrument(skip(self), fields(len = self.moves.len()))]
    pub fn to_json(&self) -> Result<String, HistoryError> {
        serde_json::to_string(self).map_err(|e| HistoryError {
            message: e.to_string(),
        })
    }

    /// Parses a persisted log.
    ///
    /// `null` parses as an empty history, matching a slot that was cleared.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the text is not a move list.
    #[instrument(skip(json), fields(len = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        let moves: Option<Vec<Move>> = serde_json::from_str(json).map_err(|e| HistoryError {
            message: e.to_string(),
        })?;
        Ok(Self {
            moves: moves.unwrap_or_default(),
        })
    }
}

impl From<Vec<Move>> for History {
    fn from(moves: Vec<Move>) -> Self {
        Self { moves }
    }
}
