//! Tests for session commands: new game, save, reload, undo, win check.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use strictly_klondike::{Interaction, MoveKind, PileId};
use strictly_solitaire::{
    InputEvent, KvStore, MemoryStore, Outcome, Session, SessionError, SolitaireConfig,
};

fn config() -> SolitaireConfig {
    SolitaireConfig::default().with_replay_delay_ms(0)
}

fn session(store: &MemoryStore, seed: u64) -> Session {
    Session::with_rng(Arc::new(store.clone()), config(), StdRng::seed_from_u64(seed))
}

#[tokio::test]
async fn test_reload_without_saved_game() {
    let store = MemoryStore::new();
    let mut session = session(&store, 1);

    let err = session.reload().await.expect_err("nothing stored");
    assert!(matches!(err, SessionError::NoSavedGame));
    assert_eq!(err.to_string(), "No previous game stored.");
    assert!(session.game().is_none());
}

#[tokio::test]
async fn test_new_game_persists_deck_and_clears_history() {
    let store = MemoryStore::new();
    store.write("SolHist", "[]").expect("seed history");
    let mut session = session(&store, 2);

    session.new_game().expect("new game");
    assert!(store.read("SolDeck").expect("read").is_some());
    assert_eq!(store.read("SolHist").expect("read"), None);
    assert!(session.game().is_some_and(|g| g.history().is_empty()));
}

#[tokio::test]
async fn test_save_requires_progress() {
    let store = MemoryStore::new();
    let mut session = session(&store, 3);
    session.new_game().expect("new game");

    let err = session.save().expect_err("nothing played");
    assert_eq!(
        err.to_string(),
        "Cannot save any progress. Try reloading game first."
    );
}

#[tokio::test]
async fn test_save_then_reload_restores_game() {
    let store = MemoryStore::new();
    let mut first = session(&store, 4);
    first.new_game().expect("new game");
    for _ in 0..5 {
        first.handle(InputEvent::Draw).await.expect("draw");
    }
    assert_eq!(first.save().expect("save"), 5);
    let saved = first.game().cloned().expect("game");

    let mut second = session(&store, 99);
    let report = second.reload().await.expect("reload");
    assert_eq!(report.replayed, 5);
    assert!(report.diverged.is_none());
    assert_eq!(second.game(), Some(&saved));
    assert_eq!(second.deck(), first.deck());
}

#[tokio::test]
async fn test_reload_with_missing_history_restores_deal() {
    let store = MemoryStore::new();
    let mut session = session(&store, 5);
    session.new_game().expect("new game");
    let dealt = session.game().cloned().expect("game");

    session.handle(InputEvent::Draw).await.expect("draw");
    let report = session.reload().await.expect("reload");
    assert_eq!(report.replayed, 0);
    assert_eq!(session.game(), Some(&dealt));
}

#[tokio::test]
async fn test_corrupt_history_is_treated_as_empty() {
    let store = MemoryStore::new();
    let mut session = session(&store, 6);
    session.new_game().expect("new game");
    store.write("SolHist", "{not json").expect("write");

    let report = session.reload().await.expect("reload");
    assert_eq!(report.replayed, 0);
}

#[tokio::test]
async fn test_corrupt_deck_is_no_saved_game() {
    let store = MemoryStore::new();
    store.write("SolDeck", "{\"cards\":[]}").expect("write");
    let mut session = session(&store, 7);
    assert!(matches!(
        session.reload().await,
        Err(SessionError::NoSavedGame)
    ));
}

#[tokio::test]
async fn test_divergent_history_is_trimmed() {
    let store = MemoryStore::new();
    let mut session = session(&store, 8);
    session.new_game().expect("new game");
    // Two draws then a recorded refill while the stock still has cards.
    store
        .write(
            "SolHist",
            r#"[{"kind":"draw","source":"stock","destination":"waste","count":1,"flip_needed":false},
                {"kind":"draw","source":"stock","destination":"waste","count":1,"flip_needed":false},
                {"kind":"stock_refill","source":"waste","destination":"stock","count":2,"flip_needed":false}]"#,
        )
        .expect("write");

    let report = session.reload().await.expect("reload");
    assert_eq!(report.replayed, 2);
    assert!(report.diverged.as_ref().is_some_and(|e| e.index() == 2));
    assert_eq!(session.game().map(|g| g.history().len()), Some(2));
    assert!(report.to_string().contains("damaged"));
}

#[tokio::test]
async fn test_undo_notice_at_start() {
    let store = MemoryStore::new();
    let mut session = session(&store, 9);
    session.new_game().expect("new game");

    let err = session
        .handle(InputEvent::Undo)
        .await
        .expect_err("nothing to undo");
    assert_eq!(err.to_string(), "You are at the start of the game.");
}

#[tokio::test]
async fn test_draw_then_undo_through_events() {
    let store = MemoryStore::new();
    let mut session = session(&store, 10);
    session.new_game().expect("new game");
    let dealt = session.game().cloned().expect("game");

    let outcome = session.handle(InputEvent::Draw).await.expect("draw");
    assert!(matches!(
        outcome,
        Outcome::Played(Interaction::Moved(mv)) if mv.kind() == MoveKind::Draw
    ));
    let outcome = session.handle(InputEvent::Undo).await.expect("undo");
    assert!(matches!(outcome, Outcome::Undone(_)));
    assert_eq!(session.game(), Some(&dealt));
}

#[tokio::test]
async fn test_win_check_message() {
    let store = MemoryStore::new();
    let mut session = session(&store, 11);
    session.new_game().expect("new game");

    let outcome = session.handle(InputEvent::CheckWin).await.expect("check");
    assert_eq!(outcome, Outcome::Win(false));
    assert_eq!(outcome.to_string(), "the game is not over yet");
    assert_eq!(Outcome::Win(true).to_string(), "you're a winner");
}

#[tokio::test]
async fn test_gestures_need_a_game() {
    let store = MemoryStore::new();
    let mut session = session(&store, 12);
    let err = session
        .handle(InputEvent::Click {
            pile: PileId::Tableau(0),
            index: None,
        })
        .await
        .expect_err("no game");
    assert!(matches!(err, SessionError::NoGame));
}

#[tokio::test]
async fn test_click_defaults_to_top_card() {
    let store = MemoryStore::new();
    let mut session = session(&store, 13);
    session.new_game().expect("new game");

    let outcome = session
        .handle(InputEvent::Click {
            pile: PileId::Tableau(6),
            index: None,
        })
        .await
        .expect("click");
    assert!(matches!(outcome, Outcome::Played(Interaction::Selected(sel)) if sel.count() == 1));
}

#[tokio::test]
async fn test_clear_saved() {
    let store = MemoryStore::new();
    let mut session = session(&store, 14);
    session.new_game().expect("new game");
    session.clear_saved().expect("clear");
    assert!(matches!(
        session.reload().await,
        Err(SessionError::NoSavedGame)
    ));
}

#[tokio::test]
async fn test_reload_waits_between_moves() {
    let store = MemoryStore::new();
    let mut first = session(&store, 15);
    first.new_game().expect("new game");
    for _ in 0..3 {
        first.handle(InputEvent::Draw).await.expect("draw");
    }
    first.save().expect("save");

    let mut slow = Session::with_rng(
        Arc::new(store.clone()),
        SolitaireConfig::default().with_replay_delay_ms(10),
        StdRng::seed_from_u64(0),
    );
    let started = std::time::Instant::now();
    slow.reload().await.expect("reload");
    assert!(started.elapsed() >= std::time::Duration::from_millis(30));
}
