//! Win detection for Klondike.

use crate::pile::Table;
use tracing::instrument;

/// Checks whether the game is won.
///
/// The game counts as won once no tableau stack holds a face-down card:
/// everything left can then be played out without further choices.
/// Empty stacks satisfy the condition.
#[instrument(skip(table))]
pub fn is_won(table: &Table) -> bool {
    table.tableau().iter().all(|stack| stack.face_down_count() == 0)
}
