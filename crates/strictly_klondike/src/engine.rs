//! The move engine.
//!
//! [`GameState`] owns the table, the history and the selection. Every
//! transition goes through one of its methods, whether it comes from live
//! input or from replaying a saved game, so both paths behave identically.
//!
//! A successful move always:
//! 1. flips the card left exposed on the source if it was face-down,
//! 2. records a [`Move`] in the history,
//! 3. relocates the run in order and clears the selection,
//! 4. re-evaluates the win signal.
//!
//! A rejected move clears the selection and changes nothing else.

use crate::action::{Move, MoveError, MoveKind, UndoError};
use crate::card::{Card, Suit};
use crate::deck::Deck;
use crate::history::History;
use crate::invariants::assert_invariants;
use crate::pile::{PileId, Table};
use crate::rules;
use crate::selection::Selection;
use crate::setup::deal;
use tracing::{debug, info, instrument, warn};

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    table: Table,
    history: History,
    selection: Option<Selection>,
    won: bool,
}

impl GameState {
    /// Deals a new game from `deck`.
    #[instrument(skip(deck))]
    pub fn new(deck: Deck) -> Self {
        Self::from_table(deal(deck))
    }

    /// Starts play from an arbitrary layout with an empty history.
    #[instrument(skip(table))]
    pub fn from_table(table: Table) -> Self {
        let won = rules::is_won(&table);
        Self {
            table,
            history: History::new(),
            selection: None,
            won,
        }
    }

    /// The table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The move history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The active selection.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// The selected cards, bottom first. Empty without a selection.
    pub fn selected_cards(&self) -> &[Card] {
        match self.selection {
            Some(sel) => self.table.pile(sel.source()).top_run(sel.count()),
            None => &[],
        }
    }

    /// The win signal: raised by the move that wins, cleared only by an
    /// undo that makes the game unwon again.
    pub fn won(&self) -> bool {
        self.won
    }

    /// Evaluates the win condition without touching any state.
    pub fn check_win(&self) -> bool {
        rules::is_won(&self.table)
    }

    // ─────────────────────────────────────────────────────────────
    //  Selection
    // ─────────────────────────────────────────────────────────────

    /// Picks up the card at `index` (0 = bottom) of `pile`.
    ///
    /// In a tableau stack the selection extends to every card above it; on
    /// the waste only the top card may be picked up. Cards on the stock or
    /// a foundation are never selectable. Any previous selection is
    /// replaced. On error the previous selection is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the card does not exist or cannot be selected.
    #[instrument(skip(self))]
    pub fn select(&mut self, pile: PileId, index: usize) -> Result<Selection, MoveError> {
        if !self.table.contains(pile) {
            return Err(MoveError::UnknownPile(pile));
        }
        let cards = self.table.pile(pile);
        let card = *cards.get(index).ok_or(MoveError::NoCard(pile, index))?;

        let selectable = match pile {
            PileId::Stock | PileId::Foundation(_) => false,
            PileId::Waste => index + 1 == cards.len(),
            PileId::Tableau(_) => card.is_face_up(),
        };
        if !selectable {
            debug!(%card, %pile, "Card not selectable");
            return Err(MoveError::NotSelectable(card, pile));
        }

        let selection = Selection::new(pile, cards.len() - index);
        debug!(%card, count = selection.count(), "Selected");
        self.selection = Some(selection);
        Ok(selection)
    }

    /// Drops the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Moves the selection onto the top card of tableau stack `target`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] and clears the selection if the stack is empty,
    /// its top card is face-down, it is the selection's own stack, or the
    /// selection's bottom card is not the opposite colour and one rank lower.
    #[instrument(skip(self))]
    pub fn try_move_to_tableau(&mut self, target: usize) -> Result<Move, MoveError> {
        let target = PileId::Tableau(target);
        self.attempt(target, |run, table| {
            rules::check_tableau(run, target, table.pile(target))
        })
    }

    /// Moves the selection onto the empty tableau stack `target`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] and clears the selection unless the stack is
    /// empty and the selection starts with a King.
    #[instrument(skip(self))]
    pub fn try_move_to_empty_tableau(&mut self, target: usize) -> Result<Move, MoveError> {
        let target = PileId::Tableau(target);
        self.attempt(target, |run, table| {
            rules::check_empty_tableau(run, target, table.pile(target))
        })
    }

    /// Moves the selected card onto the bay for `suit`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] and clears the selection unless exactly one
    /// card of that suit is selected and it follows the bay's top ordinal.
    #[instrument(skip(self))]
    pub fn try_move_to_foundation(&mut self, suit: Suit) -> Result<Move, MoveError> {
        let bay = PileId::Foundation(suit);
        self.attempt(bay, |run, table| rules::check_foundation(run, bay, table))
    }

    /// Sends the card at `index` of `pile` home without a prior selection.
    ///
    /// The card must be the face-up top card of a tableau stack or the
    /// waste. All four bays are scanned and the one that accepts it
    /// receives it.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] and clears the selection if the card cannot be
    /// picked up or no bay accepts it.
    #[instrument(skip(self))]
    pub fn auto_move_to_foundation(&mut self, pile: PileId, index: usize) -> Result<Move, MoveError> {
        let single = self.single_top_card(pile, index);
        let found = single.and_then(|card| {
            if rules::accepts_on_foundation(&card, &self.table) {
                Ok(PileId::Foundation(card.suit()))
            } else {
                Err(MoveError::NoFoundation(card))
            }
        });

        match found {
            Ok(bay) => {
                let selection = Selection::new(pile, 1);
                Ok(self.apply(selection, bay))
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Turns the next stock card onto the waste, or recycles the waste.
    ///
    /// With cards on the stock, the top one goes face-up onto the waste as
    /// a [`MoveKind::Draw`]. With the stock empty, the whole waste goes
    /// back face-down in reverse order as one [`MoveKind::StockRefill`], so
    /// the first card drawn in the last pass is drawn first again. Any
    /// selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NothingToDraw`] when stock and waste are both empty.
    #[instrument(skip(self))]
    pub fn draw_from_stock(&mut self) -> Result<Move, MoveError> {
        self.selection = None;

        let mv = if let Some(mut card) = self.table.pile_mut(PileId::Stock).pop() {
            card.flip_up();
            self.table.pile_mut(PileId::Waste).push(card);
            debug!(%card, "Drew card");
            Move::draw()
        } else if !self.table.waste().is_empty() {
            let count = self.table.waste().len();
            while let Some(mut card) = self.table.pile_mut(PileId::Waste).pop() {
                card.flip_down();
                self.table.pile_mut(PileId::Stock).push(card);
            }
            debug!(count, "Waste turned back onto stock");
            Move::stock_refill(count)
        } else {
            debug!("Stock and waste are empty");
            return Err(MoveError::NothingToDraw);
        };

        self.record(mv);
        Ok(mv)
    }

    // ─────────────────────────────────────────────────────────────
    //  Undo
    // ─────────────────────────────────────────────────────────────

    /// Reverses the most recent move and removes it from the history.
    ///
    /// # Errors
    ///
    /// Returns [`UndoError::EmptyHistory`] when nothing has been played, and
    /// [`UndoError::Inconsistent`] if the table cannot hold the reversal.
    /// The state is unchanged on error.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<Move, UndoError> {
        let mv = *self.history.last().ok_or(UndoError::EmptyHistory)?;
        let held = self.table.pile(mv.destination()).len();
        if held < mv.count() {
            warn!(%mv, held, "History does not match table");
            return Err(UndoError::Inconsistent(mv, mv.destination()));
        }

        match mv.kind() {
            MoveKind::Draw | MoveKind::Standard => {
                let run = self.table.pile_mut(mv.destination()).take_top(mv.count());
                let source = self.table.pile_mut(mv.source());
                if mv.flip_needed()
                    && let Some(exposed) = source.top_mut()
                {
                    exposed.flip_down();
                }
                let to_stock = mv.source() == PileId::Stock;
                source.extend(run.into_iter().map(|mut card| {
                    if to_stock {
                        card.flip_down();
                    }
                    card
                }));
            }
            MoveKind::StockRefill => {
                for _ in 0..mv.count() {
                    if let Some(mut card) = self.table.pile_mut(PileId::Stock).pop() {
                        card.flip_up();
                        self.table.pile_mut(PileId::Waste).push(card);
                    }
                }
            }
        }

        self.history.pop();
        self.selection = None;
        self.update_win_signal();
        assert_invariants(self);
        info!(%mv, remaining = self.history.len(), "Move undone");
        Ok(mv)
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    /// Validates the selection against `target` with `check`, then applies
    /// or rejects.
    fn attempt(
        &mut self,
        target: PileId,
        check: impl FnOnce(&[Card], &Table) -> Result<(), MoveError>,
    ) -> Result<Move, MoveError> {
        let checked = self.selection_for(target).and_then(|selection| {
            let run = self
                .table
                .pile(selection.source())
                .top_run(selection.count());
            check(run, &self.table).map(|()| selection)
        });

        match checked {
            Ok(selection) => Ok(self.apply(selection, target)),
            Err(err) => Err(self.reject(err)),
        }
    }

    fn selection_for(&self, target: PileId) -> Result<Selection, MoveError> {
        let selection = self.selection.ok_or(MoveError::NoSelection)?;
        if !self.table.contains(target) {
            return Err(MoveError::UnknownPile(target));
        }
        if target == selection.source() {
            return Err(MoveError::SamePile(target));
        }
        Ok(selection)
    }

    fn single_top_card(&self, pile: PileId, index: usize) -> Result<Card, MoveError> {
        if !self.table.contains(pile) {
            return Err(MoveError::UnknownPile(pile));
        }
        let cards = self.table.pile(pile);
        let card = *cards.get(index).ok_or(MoveError::NoCard(pile, index))?;
        let playable = matches!(pile, PileId::Tableau(_) | PileId::Waste)
            && index + 1 == cards.len()
            && card.is_face_up();
        if playable {
            Ok(card)
        } else {
            Err(MoveError::NotSelectable(card, pile))
        }
    }

    fn reject(&mut self, err: MoveError) -> MoveError {
        warn!(error = %err, "Move rejected");
        self.selection = None;
        err
    }

    fn apply(&mut self, selection: Selection, destination: PileId) -> Move {
        let source = selection.source();
        let run = self.table.pile_mut(source).take_top(selection.count());

        let mut flip_needed = false;
        if let Some(exposed) = self.table.pile_mut(source).top_mut()
            && !exposed.is_face_up()
        {
            exposed.flip_up();
            flip_needed = true;
        }

        let mv = Move::standard(source, destination, run.len(), flip_needed);
        self.table.pile_mut(destination).extend(run);
        self.selection = None;
        self.record(mv);
        mv
    }

    fn record(&mut self, mv: Move) {
        self.history.push(mv);
        self.update_win_signal();
        assert_invariants(self);
        info!(%mv, moves = self.history.len(), won = self.won, "Move applied");
    }

    fn update_win_signal(&mut self) {
        let won = rules::is_won(&self.table);
        if won && !self.won {
            info!(moves = self.history.len(), "Game won");
        }
        self.won = won;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{DECK_SIZE, Rank};
    use crate::setup::TableBuilder;
    use strum::IntoEnumIterator;

    fn state(builder: TableBuilder) -> GameState {
        GameState::from_table(builder.build().expect("valid layout"))
    }

    #[test]
    fn test_select_extends_to_run() {
        let mut game = state(
            TableBuilder::new()
                .face_down(2, &[(Suit::Club, Rank::Two)])
                .face_up(2, &[(Suit::Spade, Rank::Ten), (Suit::Heart, Rank::Nine)]),
        );
        let selection = game.select(PileId::Tableau(2), 1).expect("face-up card");
        assert_eq!(selection.count(), 2);
        assert_eq!(game.selected_cards().len(), 2);
    }

    #[test]
    fn test_face_down_not_selectable() {
        let mut game = state(
            TableBuilder::new()
                .face_down(2, &[(Suit::Club, Rank::Two)])
                .face_up(2, &[(Suit::Spade, Rank::Ten)]),
        );
        assert!(matches!(
            game.select(PileId::Tableau(2), 0),
            Err(MoveError::NotSelectable(_, _))
        ));
        assert_eq!(game.selection(), None);
    }

    #[test]
    fn test_waste_only_top_selectable() {
        let mut game = state(
            TableBuilder::new().waste(&[(Suit::Club, Rank::Two), (Suit::Heart, Rank::Five)]),
        );
        assert!(game.select(PileId::Waste, 0).is_err());
        assert_eq!(game.select(PileId::Waste, 1).map(|s| s.count()), Ok(1));
    }

    #[test]
    fn test_foundation_cards_not_selectable() {
        let mut game = state(TableBuilder::new().foundation(Suit::Heart, Rank::Two));
        assert!(game.select(PileId::Foundation(Suit::Heart), 1).is_err());
    }

    #[test]
    fn test_move_flips_exposed_card() {
        let mut game = state(
            TableBuilder::new()
                .face_down(0, &[(Suit::Club, Rank::Two)])
                .face_up(0, &[(Suit::Heart, Rank::Eight)])
                .face_up(1, &[(Suit::Spade, Rank::Nine)]),
        );
        game.select(PileId::Tableau(0), 1).expect("select");
        let mv = game.try_move_to_tableau(1).expect("legal");

        assert!(mv.flip_needed());
        assert_eq!(mv.count(), 1);
        assert!(game.table().tableau()[0].top().is_some_and(Card::is_face_up));
        assert_eq!(game.table().tableau()[1].len(), 2);
        assert_eq!(game.selection(), None);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.table().card_count(), DECK_SIZE);
    }

    #[test]
    fn test_illegal_move_clears_selection() {
        let mut game = state(
            TableBuilder::new()
                .face_up(0, &[(Suit::Club, Rank::Eight)])
                .face_up(1, &[(Suit::Spade, Rank::Nine)]),
        );
        let before = game.table().clone();
        game.select(PileId::Tableau(0), 0).expect("select");
        assert!(game.try_move_to_tableau(1).is_err());
        assert_eq!(game.selection(), None);
        assert_eq!(game.table(), &before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_same_stack_target_rejected() {
        let mut game = state(
            TableBuilder::new().face_up(0, &[(Suit::Spade, Rank::Nine), (Suit::Heart, Rank::Eight)]),
        );
        game.select(PileId::Tableau(0), 1).expect("select");
        assert_eq!(
            game.try_move_to_tableau(0),
            Err(MoveError::SamePile(PileId::Tableau(0)))
        );
    }

    #[test]
    fn test_target_without_selection() {
        let mut game = state(TableBuilder::new().face_up(1, &[(Suit::Spade, Rank::Nine)]));
        assert_eq!(game.try_move_to_tableau(1), Err(MoveError::NoSelection));
    }

    #[test]
    fn test_unknown_stack() {
        let mut game = state(TableBuilder::new().waste(&[(Suit::Spade, Rank::King)]));
        game.select(PileId::Waste, 0).expect("select");
        assert_eq!(
            game.try_move_to_empty_tableau(9),
            Err(MoveError::UnknownPile(PileId::Tableau(9)))
        );
    }

    #[test]
    fn test_auto_move_to_foundation() {
        let mut game = state(
            TableBuilder::new()
                .foundation(Suit::Diamond, Rank::Four)
                .face_up(5, &[(Suit::Diamond, Rank::Five)]),
        );
        let mv = game
            .auto_move_to_foundation(PileId::Tableau(5), 0)
            .expect("accepted");
        assert_eq!(mv.destination(), PileId::Foundation(Suit::Diamond));
        assert_eq!(game.table().foundation_top_ordinal(Suit::Diamond), 5);
    }

    #[test]
    fn test_auto_move_needs_top_card() {
        let mut game = state(
            TableBuilder::new()
                .face_up(5, &[(Suit::Spade, Rank::Two), (Suit::Heart, Rank::Ace)]),
        );
        assert!(matches!(
            game.auto_move_to_foundation(PileId::Tableau(5), 0),
            Err(MoveError::NotSelectable(_, _))
        ));
        assert!(game.auto_move_to_foundation(PileId::Tableau(5), 1).is_ok());
    }

    #[test]
    fn test_auto_move_out_of_sequence_stays_put() {
        let mut game = state(
            TableBuilder::new()
                .foundation(Suit::Club, Rank::Four)
                .face_up(2, &[(Suit::Club, Rank::Six)]),
        );
        let before = game.clone();
        assert!(matches!(
            game.auto_move_to_foundation(PileId::Tableau(2), 0),
            Err(MoveError::NoFoundation(_))
        ));
        assert_eq!(game, before);
    }

    #[test]
    fn test_draw_and_undo_draw() {
        let mut game = GameState::new(Deck::new());
        let before = game.clone();
        let mv = game.draw_from_stock().expect("stock has cards");
        assert_eq!(mv.kind(), MoveKind::Draw);
        assert_eq!(game.table().waste().len(), 1);
        assert!(game.table().waste().top().is_some_and(Card::is_face_up));

        game.undo().expect("undo");
        assert_eq!(game, before);
    }

    #[test]
    fn test_draw_from_empty_piles() {
        let mut game = state(
            Suit::iter().fold(TableBuilder::new(), |b, suit| b.foundation(suit, Rank::King)),
        );
        assert!(game.table().stock().is_empty());
        assert_eq!(game.draw_from_stock(), Err(MoveError::NothingToDraw));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_undo_empty_history() {
        let mut game = GameState::new(Deck::new());
        assert_eq!(game.undo(), Err(UndoError::EmptyHistory));
    }
}
