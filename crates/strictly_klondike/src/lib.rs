//! Strictly Klondike - pure Klondike solitaire game logic
//!
//! Everything that decides what a move means lives here, free of any I/O.
//!
//! # Architecture
//!
//! - **Cards and piles**: [`Card`], [`Deck`], [`Pile`], [`Table`]
//! - **Rules**: legality checks shared by play, replay and invariants
//! - **Engine**: [`GameState`] applies moves, records [`History`], undoes
//! - **Replay**: rebuilds a game from its deck and history
//! - **Interaction**: maps clicks and drags onto engine operations
//!
//! # Example
//!
//! ```
//! use strictly_klondike::{Deck, GameState, MoveKind};
//!
//! let mut game = GameState::new(Deck::new());
//! let mv = game.draw_from_stock().expect("fresh stock");
//! assert_eq!(mv.kind(), MoveKind::Draw);
//! game.undo().expect("one move to undo");
//! assert!(game.history().is_empty());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod card;
mod deck;
mod engine;
mod history;
mod interaction;
pub mod invariants;
mod pile;
mod replay;
pub mod rules;
mod selection;
mod setup;

// Crate-level exports - Cards and deck
pub use card::{Card, Color, DECK_SIZE, Rank, Suit, full_deck};
pub use deck::{Deck, DeckError};

// Crate-level exports - Table layout
pub use pile::{FOUNDATION_BAYS, Pile, PileId, TABLEAU_STACKS, Table};
pub use setup::{SetupError, TableBuilder, deal};

// Crate-level exports - Moves and history
pub use action::{Move, MoveError, MoveKind, UndoError};
pub use history::{History, HistoryError};
pub use selection::Selection;

// Crate-level exports - Engine
pub use engine::GameState;
pub use interaction::{Interaction, click_card, click_pile, double_click, drag_start, drop_on};
pub use invariants::{Invariant, InvariantSet, InvariantViolation, KlondikeInvariants};
pub use replay::{ReplayError, Replayer, replay};
