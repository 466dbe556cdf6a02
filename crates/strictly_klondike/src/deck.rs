//! Deck construction, shuffling and the persisted deal order.

use crate::card::{Card, DECK_SIZE, full_deck};
use derive_more::{Display, Error};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, instrument};

/// An ordered queue of cards used to deal a game.
///
/// The deck is only consumed during the deal; the move engine never
/// shuffles mid-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Card>,
}

/// Error decoding a persisted deck.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DeckError {
    /// The text is not a deck document.
    #[display("Deck is not valid JSON: {}", _0)]
    Malformed(#[error(not(source))] String),
    /// The deck does not hold exactly 52 cards.
    #[display("Deck holds {} cards, expected 52", _0)]
    WrongSize(#[error(not(source))] usize),
    /// The same card appears twice.
    #[display("Card {} appears more than once", _0)]
    Duplicate(#[error(not(source))] Card),
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Creates an unshuffled deck in suit-major order.
    #[instrument]
    pub fn new() -> Self {
        Self {
            cards: full_deck().into(),
        }
    }

    /// Creates a deck shuffled with the given random source.
    #[instrument(skip(rng))]
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// Builds a deck from an explicit card order.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError`] unless the cards are exactly the 52 distinct cards.
    #[instrument(skip(cards), fields(len = cards.len()))]
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize(cards.len()));
        }
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert((card.suit(), card.rank())) {
                return Err(DeckError::Duplicate(*card));
            }
        }
        let cards = cards
            .into_iter()
            .map(|card| Card::new(card.suit(), card.rank()))
            .collect();
        Ok(Self { cards })
    }

    /// Fisher–Yates shuffle in place.
    #[instrument(skip(self, rng))]
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
        debug!("Deck shuffled");
    }

    /// Number of cards remaining.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is exhausted.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Takes the next card to deal.
    pub fn pop_front(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Returns a card to the back of the deck.
    pub fn push_back(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Iterates the cards in deal order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Serializes the deal order for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Malformed`] if serialization fails.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, DeckError> {
        serde_json::to_string(self).map_err(|e| DeckError::Malformed(e.to_string()))
    }

    /// Parses and validates a persisted deal order.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError`] if the text does not describe a full deck.
    #[instrument(skip(json), fields(len = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let raw: Deck =
            serde_json::from_str(json).map_err(|e| DeckError::Malformed(e.to_string()))?;
        Self::from_cards(raw.cards.into())
    }
}
