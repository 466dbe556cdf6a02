//! Tableau runs: face-up cards on a stack form a valid sequence.

use super::Invariant;
use crate::engine::GameState;
use crate::rules::is_valid_run;

/// Invariant: the face-up part of every tableau stack alternates colour
/// and descends by one rank.
///
/// Only legal moves build on a stack, so anything else means the table
/// was corrupted.
pub struct TableauRunsInvariant;

impl Invariant<GameState> for TableauRunsInvariant {
    fn holds(game: &GameState) -> bool {
        game.table()
            .tableau()
            .iter()
            .all(|stack| is_valid_run(stack.top_run(stack.face_up_run_len())))
    }

    fn description() -> &'static str {
        "Face-up tableau cards alternate colour and descend by one"
    }
}
