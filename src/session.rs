//! A player's session: the active game, its saved copy and the commands.
//!
//! The session owns at most one game. Nothing is dealt until the player
//! starts a new game or reloads the saved one.

use crate::config::SolitaireConfig;
use crate::input::InputEvent;
use crate::store::{KvStore, StoreError};
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use strictly_klondike::{
    Deck, DeckError, GameState, History, HistoryError, Interaction, Move, PileId, ReplayError,
    Replayer, UndoError, click_card, click_pile, double_click, drag_start, drop_on,
};
use tracing::{debug, info, instrument, warn};

/// Notices and failures reported to the player.
///
/// None of these end the session; the game is left as it was.
#[derive(Debug, Clone, Display, Error)]
pub enum SessionError {
    /// Reload found no saved deck.
    #[display("No previous game stored.")]
    NoSavedGame,

    /// Save with nothing played.
    #[display("Cannot save any progress. Try reloading game first.")]
    NothingToSave,

    /// A game command before any game was started.
    #[display("No game in progress. Start a new game or reload one first.")]
    NoGame,

    /// Undo failed.
    #[display("{}", _0)]
    Undo(UndoError),

    /// The store failed.
    #[display("{}", _0)]
    Store(StoreError),

    /// The deck could not be encoded.
    #[display("{}", _0)]
    Deck(DeckError),

    /// The history could not be encoded.
    #[display("{}", _0)]
    History(HistoryError),
}

impl From<UndoError> for SessionError {
    fn from(err: UndoError) -> Self {
        Self::Undo(err)
    }
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<DeckError> for SessionError {
    fn from(err: DeckError) -> Self {
        Self::Deck(err)
    }
}

impl From<HistoryError> for SessionError {
    fn from(err: HistoryError) -> Self {
        Self::History(err)
    }
}

/// What a reload restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadReport {
    /// Moves replayed onto the fresh deal.
    pub replayed: usize,
    /// Where the saved history stopped matching the table, if it did.
    pub diverged: Option<ReplayError>,
}

impl std::fmt::Display for ReloadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game reloaded ({} moves replayed).", self.replayed)?;
        if let Some(err) = &self.diverged {
            write!(f, " Saved history was damaged and stops here: {}", err)?;
        }
        Ok(())
    }
}

/// Result of one handled input event.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Outcome {
    /// A new game was dealt.
    #[display("New game dealt.")]
    Started,
    /// The saved game was restored.
    #[display("{}", _0)]
    Reloaded(ReloadReport),
    /// The history was saved.
    #[display("Saved {} moves.", _0)]
    Saved(usize),
    /// A move was taken back.
    #[display("Undid {}.", _0)]
    Undone(Move),
    /// Answer to the win check.
    #[display("{}", if *_0 { "you're a winner" } else { "the game is not over yet" })]
    Win(bool),
    /// A gesture was applied.
    #[display("{}", _0)]
    Played(Interaction),
    /// The table should be printed.
    #[display("")]
    Show,
    /// The command summary should be printed.
    #[display("")]
    Help,
    /// The player is leaving.
    #[display("Bye.")]
    Quit,
}

#[derive(Debug, Clone)]
struct ActiveGame {
    deck: Deck,
    state: GameState,
}

/// One player's session.
#[derive(Debug)]
pub struct Session {
    store: Arc<dyn KvStore>,
    config: SolitaireConfig,
    rng: StdRng,
    active: Option<ActiveGame>,
}

impl Session {
    /// Creates a session shuffling from the operating system's entropy.
    #[instrument(skip(store, config))]
    pub fn new(store: Arc<dyn KvStore>, config: SolitaireConfig) -> Self {
        Self::with_rng(store, config, StdRng::from_os_rng())
    }

    /// Creates a session shuffling from `rng`.
    #[instrument(skip(store, config, rng))]
    pub fn with_rng(store: Arc<dyn KvStore>, config: SolitaireConfig, rng: StdRng) -> Self {
        info!(deck_key = %config.deck_key(), history_key = %config.history_key(), "Creating session");
        Self {
            store,
            config,
            rng,
            active: None,
        }
    }

    /// The game in progress.
    pub fn game(&self) -> Option<&GameState> {
        self.active.as_ref().map(|a| &a.state)
    }

    /// The deck order that dealt the game in progress.
    pub fn deck(&self) -> Option<&Deck> {
        self.active.as_ref().map(|a| &a.deck)
    }

    /// The configuration.
    pub fn config(&self) -> &SolitaireConfig {
        &self.config
    }

    fn state_mut(&mut self) -> Result<&mut GameState, SessionError> {
        self.active
            .as_mut()
            .map(|a| &mut a.state)
            .ok_or(SessionError::NoGame)
    }

    /// Shuffles a fresh deck, saves its order, forgets the saved history
    /// and deals.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the deck cannot be saved; the previous
    /// game is kept in that case.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> Result<(), SessionError> {
        let deck = Deck::shuffled(&mut self.rng);
        let json = deck.to_json()?;
        // Old history must never sit next to a new deck.
        self.store.clear(self.config.history_key())?;
        self.store.write(self.config.deck_key(), &json)?;

        let state = GameState::new(deck.clone());
        self.active = Some(ActiveGame { deck, state });
        info!("New game dealt");
        Ok(())
    }

    /// Restores the saved game by dealing the saved deck and replaying the
    /// saved history, pausing between moves for the configured delay.
    ///
    /// A missing history restores the bare deal. A history that stops
    /// matching the table is replayed up to that point and reported in
    /// the [`ReloadReport`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoSavedGame`] when no readable deck is
    /// stored, leaving the current game untouched.
    #[instrument(skip(self))]
    pub async fn reload(&mut self) -> Result<ReloadReport, SessionError> {
        let deck = self.load_deck()?;
        let history = self.load_history()?;
        let delay = self.config.replay_delay();

        let mut replayer = Replayer::new(deck.clone(), &history);
        let mut diverged = None;
        while replayer.remaining() > 0 {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if let Some(Err(err)) = replayer.step() {
                diverged = Some(err);
            }
        }

        let state = replayer.state().clone();
        let report = ReloadReport {
            replayed: state.history().len(),
            diverged,
        };
        info!(replayed = report.replayed, saved = history.len(), "Game reloaded");
        self.active = Some(ActiveGame { deck, state });
        Ok(report)
    }

    fn load_deck(&self) -> Result<Deck, SessionError> {
        let Some(json) = self.store.read(self.config.deck_key())? else {
            debug!("No saved deck");
            return Err(SessionError::NoSavedGame);
        };
        Deck::from_json(&json).map_err(|err| {
            warn!(error = %err, "Saved deck unreadable");
            SessionError::NoSavedGame
        })
    }

    fn load_history(&self) -> Result<History, SessionError> {
        let Some(json) = self.store.read(self.config.history_key())? else {
            debug!("No saved history");
            return Ok(History::new());
        };
        Ok(History::from_json(&json).unwrap_or_else(|err| {
            warn!(error = %err, "Saved history unreadable, starting from the deal");
            History::new()
        }))
    }

    /// Saves the moves played so far.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NothingToSave`] when no move has been
    /// played, or a store error.
    #[instrument(skip(self))]
    pub fn save(&self) -> Result<usize, SessionError> {
        let history = self
            .game()
            .map(GameState::history)
            .filter(|h| !h.is_empty())
            .ok_or(SessionError::NothingToSave)?;
        self.store.write(self.config.history_key(), &history.to_json()?)?;
        info!(moves = history.len(), "Game saved");
        Ok(history.len())
    }

    /// Takes back the last move.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Undo`] at the start of the game.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<Move, SessionError> {
        let state = self
            .active
            .as_mut()
            .map(|a| &mut a.state)
            .ok_or(SessionError::Undo(UndoError::EmptyHistory))?;
        Ok(state.undo()?)
    }

    /// Whether the game in progress is won. Changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoGame`] without a game.
    #[instrument(skip(self))]
    pub fn check_win(&self) -> Result<bool, SessionError> {
        self.game()
            .map(GameState::check_win)
            .ok_or(SessionError::NoGame)
    }

    /// Removes the saved game from the store.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the store fails.
    #[instrument(skip(self))]
    pub fn clear_saved(&self) -> Result<(), SessionError> {
        self.store.clear(self.config.deck_key())?;
        self.store.clear(self.config.history_key())?;
        info!("Saved game cleared");
        Ok(())
    }

    /// Handles one input event.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for notices; the game is unchanged.
    #[instrument(skip(self))]
    pub async fn handle(&mut self, event: InputEvent) -> Result<Outcome, SessionError> {
        let outcome = match event {
            InputEvent::NewGame => self.new_game().map(|()| Outcome::Started)?,
            InputEvent::Reload => Outcome::Reloaded(self.reload().await?),
            InputEvent::Save => Outcome::Saved(self.save()?),
            InputEvent::Undo => Outcome::Undone(self.undo()?),
            InputEvent::CheckWin => Outcome::Win(self.check_win()?),
            InputEvent::Show => Outcome::Show,
            InputEvent::Help => Outcome::Help,
            InputEvent::Quit => Outcome::Quit,
            InputEvent::Draw => Outcome::Played(click_pile(self.state_mut()?, PileId::Stock)),
            InputEvent::Click { pile, index } => {
                let state = self.state_mut()?;
                Outcome::Played(match resolve(state, pile, index) {
                    Some(index) => click_card(state, pile, index),
                    None => click_pile(state, pile),
                })
            }
            InputEvent::DoubleClick { pile, index } => {
                let state = self.state_mut()?;
                Outcome::Played(match resolve(state, pile, index) {
                    Some(index) => double_click(state, pile, index),
                    None => Interaction::Ignored,
                })
            }
            InputEvent::DragStart { pile, index } => {
                let state = self.state_mut()?;
                Outcome::Played(match resolve(state, pile, index) {
                    Some(index) => drag_start(state, pile, index),
                    None => Interaction::Ignored,
                })
            }
            InputEvent::Drop { pile, index } => {
                let state = self.state_mut()?;
                let index = resolve(state, pile, index);
                Outcome::Played(drop_on(state, pile, index))
            }
        };
        debug!(%outcome, "Event handled");
        Ok(outcome)
    }
}

/// Card position a gesture refers to: the given one, or the top card of a
/// waste or tableau pile when none was given. `None` means the pile itself.
fn resolve(state: &GameState, pile: PileId, index: Option<usize>) -> Option<usize> {
    if index.is_some() {
        return index;
    }
    match pile {
        PileId::Waste | PileId::Tableau(_) if state.table().contains(pile) => {
            state.table().pile(pile).len().checked_sub(1)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session() -> Session {
        let config = SolitaireConfig::default().with_replay_delay_ms(0);
        Session::with_rng(Arc::new(MemoryStore::new()), config, StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_no_game_until_started() {
        let mut session = session();
        assert!(session.game().is_none());
        assert!(matches!(session.check_win(), Err(SessionError::NoGame)));
        assert!(matches!(session.save(), Err(SessionError::NothingToSave)));
        assert_eq!(
            session.undo().map_err(|e| e.to_string()),
            Err("You are at the start of the game.".to_string())
        );
    }

    /// Store whose `clear` always fails.
    #[derive(Debug, Default)]
    struct StuckStore {
        inner: MemoryStore,
    }

    impl KvStore for StuckStore {
        fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.write(key, value)
        }

        fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.read(key)
        }

        fn clear(&self, key: &str) -> Result<(), StoreError> {
            Err(StoreError::new("read-only").on_slot(key))
        }
    }

    #[test]
    fn test_failed_history_clear_keeps_saved_deck() {
        let store = Arc::new(StuckStore::default());
        store.write("SolDeck", "old deck").expect("seed deck");
        store.write("SolHist", "old history").expect("seed history");
        let config = SolitaireConfig::default().with_replay_delay_ms(0);
        let mut session = Session::with_rng(store.clone(), config, StdRng::seed_from_u64(2));

        assert!(matches!(session.new_game(), Err(SessionError::Store(_))));
        assert!(session.game().is_none());
        assert_eq!(store.read("SolDeck").expect("read").as_deref(), Some("old deck"));
        assert_eq!(store.read("SolHist").expect("read").as_deref(), Some("old history"));
    }

    #[test]
    fn test_resolve_defaults_to_top_card() {
        let state = GameState::new(Deck::new());
        assert_eq!(resolve(&state, PileId::Tableau(3), None), Some(3));
        assert_eq!(resolve(&state, PileId::Waste, None), None);
        assert_eq!(resolve(&state, PileId::Stock, None), None);
        assert_eq!(resolve(&state, PileId::Tableau(3), Some(1)), Some(1));
    }
}
