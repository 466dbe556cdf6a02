//! First-class invariants for Klondike.
//!
//! Invariants are properties of a [`GameState`] that every move and every
//! undo must preserve. The engine asserts them in debug builds; they can
//! also be checked on demand, for example after restoring a saved game.

use crate::engine::GameState;
use derive_more::{Display, Error};
use tracing::instrument;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of two to four invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        collect(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        collect(violations)
    }
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        check::<S, I4>(state, &mut violations);
        collect(violations)
    }
}

pub mod card_conservation;
pub mod foundation_sequence;
pub mod pile_facing;
pub mod tableau_runs;

pub use card_conservation::CardConservationInvariant;
pub use foundation_sequence::FoundationSequenceInvariant;
pub use pile_facing::PileFacingInvariant;
pub use tableau_runs::TableauRunsInvariant;

/// All Klondike invariants as a composable set.
pub type KlondikeInvariants = (
    CardConservationInvariant,
    FoundationSequenceInvariant,
    PileFacingInvariant,
    TableauRunsInvariant,
);

/// Asserts that all game invariants hold (panic on violation in debug builds).
#[instrument(skip(game))]
pub fn assert_invariants(game: &GameState) {
    debug_assert!(
        CardConservationInvariant::holds(game),
        "{}",
        CardConservationInvariant::description()
    );
    debug_assert!(
        FoundationSequenceInvariant::holds(game),
        "{}",
        FoundationSequenceInvariant::description()
    );
    debug_assert!(
        PileFacingInvariant::holds(game),
        "{}",
        PileFacingInvariant::description()
    );
    debug_assert!(
        TableauRunsInvariant::holds(game),
        "{}",
        TableauRunsInvariant::description()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::deck::Deck;
    use crate::pile::PileId;
    use crate::setup::TableBuilder;

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let game = GameState::new(Deck::new());
        assert!(KlondikeInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_draws() {
        let mut game = GameState::new(Deck::new());
        for _ in 0..30 {
            game.draw_from_stock().expect("draw or refill");
        }
        assert!(KlondikeInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_each_violation() {
        let mut table = TableBuilder::new()
            .face_up(0, &[(Suit::Spade, Rank::Nine), (Suit::Club, Rank::Eight)])
            .build()
            .expect("layout");
        table
            .pile_mut(PileId::Waste)
            .push(crate::card::Card::new(Suit::Spade, Rank::Nine).face_up());
        let game = GameState::from_table(table);

        let violations = KlondikeInvariants::check_all(&game).expect_err("corrupt table");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        let game = GameState::new(Deck::new());
        type TwoInvariants = (CardConservationInvariant, PileFacingInvariant);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
