//! Core card types for Klondike.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::instrument;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Card suit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Spades (black).
    #[display("♠")]
    Spade,
    /// Clubs (black).
    #[display("♣")]
    Club,
    /// Hearts (red).
    #[display("♥")]
    Heart,
    /// Diamonds (red).
    #[display("♦")]
    Diamond,
}

impl Suit {
    /// Returns the colour of this suit.
    pub fn color(self) -> Color {
        match self {
            Suit::Spade | Suit::Club => Color::Black,
            Suit::Heart | Suit::Diamond => Color::Red,
        }
    }

    /// Position of this suit in [`Suit::iter`] order (0-3).
    pub fn index(self) -> usize {
        match self {
            Suit::Spade => 0,
            Suit::Club => 1,
            Suit::Heart => 2,
            Suit::Diamond => 3,
        }
    }
}

/// Card colour, derived from the suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Color {
    /// Spades and clubs.
    #[display("black")]
    Black,
    /// Hearts and diamonds.
    #[display("red")]
    Red,
}

/// Card rank, Ace low.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize, EnumIter,
)]
pub enum Rank {
    /// Ace (ordinal 1).
    #[display("A")]
    Ace,
    /// Two.
    #[display("2")]
    Two,
    /// Three.
    #[display("3")]
    Three,
    /// Four.
    #[display("4")]
    Four,
    /// Five.
    #[display("5")]
    Five,
    /// Six.
    #[display("6")]
    Six,
    /// Seven.
    #[display("7")]
    Seven,
    /// Eight.
    #[display("8")]
    Eight,
    /// Nine.
    #[display("9")]
    Nine,
    /// Ten.
    #[display("10")]
    Ten,
    /// Jack (ordinal 11).
    #[display("J")]
    Jack,
    /// Queen (ordinal 12).
    #[display("Q")]
    Queen,
    /// King (ordinal 13).
    #[display("K")]
    King,
}

impl Rank {
    /// Integer value of the rank, Ace = 1 through King = 13.
    pub fn ordinal(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
        }
    }
}

/// A playing card.
///
/// Suit and rank never change; `face_up` flips over the card's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{}{}", rank, suit)]
pub struct Card {
    suit: Suit,
    rank: Rank,
    #[serde(default, skip_serializing)]
    face_up: bool,
}

impl Card {
    /// Creates a face-down card.
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    /// Returns the suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the ordinal of the rank (1-13).
    pub fn ordinal(&self) -> u8 {
        self.rank.ordinal()
    }

    /// Returns the colour.
    pub fn color(&self) -> Color {
        self.suit.color()
    }

    /// Whether the card shows its face.
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Turns the card face-up.
    pub fn flip_up(&mut self) {
        self.face_up = true;
    }

    /// Turns the card face-down.
    pub fn flip_down(&mut self) {
        self.face_up = false;
    }

    /// Whether both cards are the same suit and rank, regardless of facing.
    pub fn same_identity(&self, other: &Card) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }

    /// Returns the same card face-up.
    pub fn face_up(mut self) -> Self {
        self.face_up = true;
        self
    }
}

/// All 52 cards in suit-major order, face-down.
#[instrument]
pub fn full_deck() -> Vec<Card> {
    Suit::iter()
        .flat_map(|suit| Rank::iter().map(move |rank| Card::new(suit, rank)))
        .collect()
}
