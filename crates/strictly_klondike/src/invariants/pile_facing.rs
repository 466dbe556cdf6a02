//! Pile facing: where cards may lie face-down.

use super::Invariant;
use crate::engine::GameState;

/// Invariant: the stock is all face-down, the waste all face-up, and in
/// each tableau stack no face-up card lies beneath a face-down one.
pub struct PileFacingInvariant;

impl Invariant<GameState> for PileFacingInvariant {
    fn holds(game: &GameState) -> bool {
        let table = game.table();
        let stock_down = table.stock().cards().iter().all(|c| !c.is_face_up());
        let waste_up = table.waste().cards().iter().all(|c| c.is_face_up());
        let stacks_ordered = table
            .tableau()
            .iter()
            .all(|stack| stack.face_down_count() + stack.face_up_run_len() == stack.len());
        stock_down && waste_up && stacks_ordered
    }

    fn description() -> &'static str {
        "Stock face-down, waste face-up, tableau face-down cards only at the bottom"
    }
}
