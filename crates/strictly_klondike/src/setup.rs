//! Dealing a new game and building arbitrary table layouts.

use crate::card::{Card, Rank, Suit, full_deck};
use crate::deck::Deck;
use crate::pile::{PileId, TABLEAU_STACKS, Table};
use derive_more::{Display, Error};
use std::collections::HashSet;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Deals a Klondike layout from the front of `deck`.
///
/// Stack `i` receives `i + 1` cards, only the last one face-up. Whatever is
/// left goes onto the stock face-down in deck order, so the final card of
/// the deck is the first one drawn.
#[instrument(skip(deck), fields(cards = deck.len()))]
pub fn deal(mut deck: Deck) -> Table {
    let mut table = Table::empty();

    for stack in 0..TABLEAU_STACKS {
        for row in 0..=stack {
            let Some(mut card) = deck.pop_front() else {
                break;
            };
            if row == stack {
                card.flip_up();
            }
            table.pile_mut(PileId::Tableau(stack)).push(card);
        }
    }

    while let Some(mut card) = deck.pop_front() {
        card.flip_down();
        table.pile_mut(PileId::Stock).push(card);
    }

    debug!(stock = table.stock().len(), "Deal complete");
    table
}

/// Error building a table layout.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SetupError {
    /// A card was placed twice.
    #[display("Card {} placed more than once", _0)]
    DuplicateCard(#[error(not(source))] Card),
    /// A tableau index outside 0-6.
    #[display("No tableau stack {}", _0)]
    UnknownStack(#[error(not(source))] usize),
}

/// Builds a table with chosen cards in chosen places.
///
/// Every card not placed explicitly is put on the stock face-down, so the
/// result always holds the full deck.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    placements: Vec<(PileId, Card)>,
}

impl TableBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds face-down cards to a tableau stack, bottom first.
    pub fn face_down(mut self, stack: usize, cards: &[(Suit, Rank)]) -> Self {
        for &(suit, rank) in cards {
            self.placements
                .push((PileId::Tableau(stack), Card::new(suit, rank)));
        }
        self
    }

    /// Adds face-up cards to a tableau stack, bottom first.
    pub fn face_up(mut self, stack: usize, cards: &[(Suit, Rank)]) -> Self {
        for &(suit, rank) in cards {
            self.placements
                .push((PileId::Tableau(stack), Card::new(suit, rank).face_up()));
        }
        self
    }

    /// Adds face-up cards to the waste, bottom first.
    pub fn waste(mut self, cards: &[(Suit, Rank)]) -> Self {
        for &(suit, rank) in cards {
            self.placements
                .push((PileId::Waste, Card::new(suit, rank).face_up()));
        }
        self
    }

    /// Fills the bay for `suit` from the Ace up to and including `top`.
    pub fn foundation(mut self, suit: Suit, top: Rank) -> Self {
        for rank in Rank::iter().take_while(|r| *r <= top) {
            self.placements
                .push((PileId::Foundation(suit), Card::new(suit, rank).face_up()));
        }
        self
    }

    /// Adds face-down cards to the top of the stock ahead of the leftovers.
    ///
    /// The last card given ends up on top and is drawn first.
    pub fn stock(mut self, cards: &[(Suit, Rank)]) -> Self {
        for &(suit, rank) in cards {
            self.placements.push((PileId::Stock, Card::new(suit, rank)));
        }
        self
    }

    /// Assembles the table.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] for a repeated card or an unknown stack.
    #[instrument(skip(self), fields(placed = self.placements.len()))]
    pub fn build(self) -> Result<Table, SetupError> {
        let mut seen = HashSet::new();
        for (pile, card) in &self.placements {
            if let PileId::Tableau(i) = pile
                && *i >= TABLEAU_STACKS
            {
                return Err(SetupError::UnknownStack(*i));
            }
            if !seen.insert((card.suit(), card.rank())) {
                return Err(SetupError::DuplicateCard(*card));
            }
        }

        let mut table = Table::empty();
        for card in full_deck() {
            if !seen.contains(&(card.suit(), card.rank())) {
                table.pile_mut(PileId::Stock).push(card);
            }
        }
        for (pile, card) in self.placements {
            table.pile_mut(pile).push(card);
        }
        Ok(table)
    }
}
