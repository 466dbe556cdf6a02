//! Strictly Solitaire - terminal Klondike
//!
//! Plays on stdin/stdout; logs go to stderr.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use strictly_solitaire::{
    Cli, Command, HELP, InputEvent, KvStore, MemoryStore, Outcome, Session, SessionError,
    SolitaireConfig, SqliteStore, table_view,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let mut config = SolitaireConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path.clone() {
        config = config.with_db_path(db_path);
    }
    if let Some(delay) = cli.replay_delay_ms {
        config = config.with_replay_delay_ms(delay);
    }

    let command = cli.command.unwrap_or(Command::Play);
    if command == Command::Show {
        config = config.with_replay_delay_ms(0);
    }

    let store = open_store(&cli, &config)?;
    let mut session = Session::new(store, config);

    match command {
        Command::Play => run_play(&mut session).await,
        Command::Show => run_show(&mut session).await,
        Command::Reset => {
            session.clear_saved()?;
            println!("Saved game deleted.");
            Ok(())
        }
    }
}

#[instrument]
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_solitaire=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tracing initialized");
}

#[instrument(skip(cli, config))]
fn open_store(cli: &Cli, config: &SolitaireConfig) -> Result<Arc<dyn KvStore>> {
    if cli.memory {
        info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(SqliteStore::open(config.db_path().clone())?))
}

/// Prints the saved game, replayed without delay.
#[instrument(skip(session))]
async fn run_show(session: &mut Session) -> Result<()> {
    match session.reload().await {
        Ok(report) => {
            if let Some(game) = session.game() {
                println!("{}", table_view(game));
            }
            println!("{}", report);
        }
        Err(err) => println!("{}", err),
    }
    Ok(())
}

/// Interactive loop: resume the saved game if there is one, else deal.
#[instrument(skip(session))]
async fn run_play(session: &mut Session) -> Result<()> {
    match session.reload().await {
        Ok(report) => println!("{}", report),
        Err(SessionError::NoSavedGame) => session.new_game()?,
        Err(err) => return Err(err.into()),
    }
    print_table(session);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let event = match line.parse::<InputEvent>() {
            Ok(event) => event,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        match session.handle(event).await {
            Ok(Outcome::Quit) => {
                println!("{}", Outcome::Quit);
                break;
            }
            Ok(Outcome::Help) => println!("{}", HELP),
            Ok(Outcome::Show) => print_table(session),
            Ok(outcome @ (Outcome::Win(_) | Outcome::Saved(_))) => println!("{}", outcome),
            Ok(outcome) => {
                println!("{}", outcome);
                print_table(session);
            }
            Err(err) => {
                warn!(error = %err, "Command refused");
                println!("{}", err);
            }
        }
    }
    Ok(())
}

fn print_table(session: &Session) {
    if let Some(game) = session.game() {
        println!("{}\n", table_view(game));
    }
}
