//! Game rules for Klondike.
//!
//! Pure checks over cards and piles, separated from the engine so that
//! live play, replay and the invariants share one definition of legality.

pub mod foundation;
pub mod tableau;
pub mod win;

pub use foundation::{accepts_on_foundation, check_foundation};
pub use tableau::{check_empty_tableau, check_tableau, is_valid_run};
pub use win::is_won;
