//! Strictly Solitaire library - Klondike sessions with saved games
//!
//! The game rules live in `strictly_klondike`; this crate wires them to
//! storage, configuration and a line-oriented front end.
//!
//! # Architecture
//!
//! - **Store**: durable key-value slots (SQLite via diesel, or memory)
//! - **Session**: new game, reload with replay, save, undo, win check
//! - **Input**: parses player lines into gestures and commands
//! - **Render**: text projection of the table
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use strictly_solitaire::{MemoryStore, Session, SolitaireConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut session = Session::new(Arc::new(MemoryStore::new()), SolitaireConfig::default());
//! session.new_game()?;
//! session.reload().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod input;
mod render;
mod session;
mod store;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, SolitaireConfig};

// Crate-level exports - Input
pub use input::{HELP, InputEvent, ParseError, parse_pile};

// Crate-level exports - Rendering
pub use render::table_view;

// Crate-level exports - Session
pub use session::{Outcome, ReloadReport, Session, SessionError};

// Crate-level exports - Storage
pub use store::{KvStore, MIGRATIONS, MemoryStore, Slot, SqliteStore, StoreError};
