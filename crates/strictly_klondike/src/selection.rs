//! The active selection.

use crate::pile::PileId;
use serde::{Deserialize, Serialize};

/// The cards currently picked up: the top `count` cards of `source`.
///
/// A game holds at most one selection at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    source: PileId,
    count: usize,
}

impl Selection {
    pub(crate) fn new(source: PileId, count: usize) -> Self {
        Self { source, count }
    }

    /// Pile the selection sits on.
    pub fn source(&self) -> PileId {
        self.source
    }

    /// Number of selected cards.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the card at `index` of `pile` (holding `pile_len` cards) is selected.
    pub fn covers(&self, pile: PileId, index: usize, pile_len: usize) -> bool {
        pile == self.source && index < pile_len && index >= pile_len.saturating_sub(self.count)
    }
}
