//! The ten piles of a Klondike table.

use crate::card::{Card, Suit};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Number of tableau stacks.
pub const TABLEAU_STACKS: usize = 7;

/// Number of foundation bays.
pub const FOUNDATION_BAYS: usize = 4;

/// Identifies one of the ten piles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PileId {
    /// Face-down draw pile.
    #[display("stock")]
    Stock,
    /// Face-up pile fed by stock draws.
    #[display("waste")]
    Waste,
    /// Foundation bay for one suit.
    #[display("foundation {}", _0)]
    Foundation(Suit),
    /// Tableau stack, 0-based (0-6).
    #[display("stack {}", _0 + 1)]
    Tableau(usize),
}

impl PileId {
    /// All ten pile ids: stock, waste, the bays, then the stacks.
    pub fn all() -> impl Iterator<Item = PileId> {
        [PileId::Stock, PileId::Waste]
            .into_iter()
            .chain(Suit::iter().map(PileId::Foundation))
            .chain((0..TABLEAU_STACKS).map(PileId::Tableau))
    }
}

/// An ordered sequence of cards, bottom first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    /// Creates an empty pile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards bottom to top.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the pile holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The top card, if any.
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Mutable access to the top card.
    pub fn top_mut(&mut self) -> Option<&mut Card> {
        self.cards.last_mut()
    }

    /// Card at `index` counted from the bottom.
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Puts a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Removes the top `count` cards, keeping their order.
    ///
    /// Takes everything when `count` exceeds the pile size.
    pub fn take_top(&mut self, count: usize) -> Vec<Card> {
        let at = self.cards.len().saturating_sub(count);
        self.cards.split_off(at)
    }

    /// Appends cards in order.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// The top `count` cards, bottom first.
    pub fn top_run(&self, count: usize) -> &[Card] {
        let at = self.cards.len().saturating_sub(count);
        &self.cards[at..]
    }

    /// Number of face-down cards.
    pub fn face_down_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_face_up()).count()
    }

    /// Number of face-up cards at the top of the pile.
    pub fn face_up_run_len(&self) -> usize {
        self.cards.iter().rev().take_while(|c| c.is_face_up()).count()
    }
}

/// The full table: stock, waste, four bays and seven stacks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    stock: Pile,
    waste: Pile,
    foundations: [Pile; FOUNDATION_BAYS],
    tableau: [Pile; TABLEAU_STACKS],
}

impl Table {
    /// Creates a table with every pile empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the pile with the given id.
    ///
    /// # Panics
    ///
    /// Panics if a tableau index is 7 or greater.
    pub fn pile(&self, id: PileId) -> &Pile {
        match id {
            PileId::Stock => &self.stock,
            PileId::Waste => &self.waste,
            PileId::Foundation(suit) => &self.foundations[suit.index()],
            PileId::Tableau(i) => &self.tableau[i],
        }
    }

    /// Mutable access to the pile with the given id.
    ///
    /// # Panics
    ///
    /// Panics if a tableau index is 7 or greater.
    pub fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        match id {
            PileId::Stock => &mut self.stock,
            PileId::Waste => &mut self.waste,
            PileId::Foundation(suit) => &mut self.foundations[suit.index()],
            PileId::Tableau(i) => &mut self.tableau[i],
        }
    }

    /// Whether `id` names a pile on this table.
    pub fn contains(&self, id: PileId) -> bool {
        match id {
            PileId::Tableau(i) => i < TABLEAU_STACKS,
            _ => true,
        }
    }

    /// The stock.
    pub fn stock(&self) -> &Pile {
        &self.stock
    }

    /// The waste.
    pub fn waste(&self) -> &Pile {
        &self.waste
    }

    /// The seven tableau stacks.
    pub fn tableau(&self) -> &[Pile; TABLEAU_STACKS] {
        &self.tableau
    }

    /// The bay for `suit`.
    pub fn foundation(&self, suit: Suit) -> &Pile {
        &self.foundations[suit.index()]
    }

    /// Ordinal of the top card in the bay for `suit`; 0 when the bay is empty.
    pub fn foundation_top_ordinal(&self, suit: Suit) -> u8 {
        self.foundation(suit).top().map_or(0, Card::ordinal)
    }

    /// Total cards across all ten piles.
    pub fn card_count(&self) -> usize {
        PileId::all().map(|id| self.pile(id).len()).sum()
    }

    /// Iterates every card with the pile holding it.
    pub fn cards(&self) -> impl Iterator<Item = (PileId, &Card)> {
        PileId::all().flat_map(move |id| self.pile(id).cards().iter().map(move |c| (id, c)))
    }
}
