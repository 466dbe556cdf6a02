//! Line-oriented player input.
//!
//! Each line is one command or one pointer gesture. Piles are named
//! `stock`/`s`, `waste`/`w`, `t1`..`t7` for the tableau and `fs`, `fc`,
//! `fh`, `fd` for the foundations. Card positions are 1-based from the
//! bottom of the pile; leaving one out means the top card.

use derive_more::{Display, Error};
use std::str::FromStr;
use strictly_klondike::{PileId, Suit, TABLEAU_STACKS};
use tracing::instrument;

/// One parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Shuffle and deal a fresh game.
    NewGame,
    /// Restore the saved game.
    Reload,
    /// Save the history.
    Save,
    /// Take back the last move.
    Undo,
    /// Ask whether the game is won.
    CheckWin,
    /// Print the table.
    Show,
    /// Print the command summary.
    Help,
    /// Leave.
    Quit,
    /// Click the stock.
    Draw,
    /// Click a card, or the pile itself when `index` is `None`.
    Click {
        /// Pile clicked.
        pile: PileId,
        /// 0-based card position.
        index: Option<usize>,
    },
    /// Double-click a card.
    DoubleClick {
        /// Pile clicked.
        pile: PileId,
        /// 0-based card position.
        index: Option<usize>,
    },
    /// Start dragging a card.
    DragStart {
        /// Pile dragged from.
        pile: PileId,
        /// 0-based card position.
        index: Option<usize>,
    },
    /// Drop the dragged cards.
    Drop {
        /// Pile dropped on.
        pile: PileId,
        /// 0-based card position.
        index: Option<usize>,
    },
}

/// Input that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseError {
    /// Blank line.
    #[display("Nothing entered")]
    Empty,
    /// First word is not a command.
    #[display("Unknown command '{}'. Type 'help' for a list.", _0)]
    UnknownCommand(#[error(not(source))] String),
    /// Pile name not recognised.
    #[display("Unknown pile '{}'", _0)]
    UnknownPile(#[error(not(source))] String),
    /// A required argument is absent.
    #[display("'{}' needs a pile", _0)]
    MissingPile(#[error(not(source))] String),
    /// Position is not a positive number.
    #[display("Bad card position '{}'", _0)]
    BadIndex(#[error(not(source))] String),
    /// Extra words after a complete command.
    #[display("Unexpected '{}'", _0)]
    Trailing(#[error(not(source))] String),
}

/// Parses a pile name.
///
/// # Errors
///
/// Returns [`ParseError::UnknownPile`] for anything else.
#[instrument]
pub fn parse_pile(word: &str) -> Result<PileId, ParseError> {
    let lower = word.to_ascii_lowercase();
    let pile = match lower.as_str() {
        "stock" | "s" => PileId::Stock,
        "waste" | "w" => PileId::Waste,
        "fs" => PileId::Foundation(Suit::Spade),
        "fc" => PileId::Foundation(Suit::Club),
        "fh" => PileId::Foundation(Suit::Heart),
        "fd" => PileId::Foundation(Suit::Diamond),
        other => {
            let stack = other
                .strip_prefix('t')
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| (1..=TABLEAU_STACKS).contains(n))
                .ok_or_else(|| ParseError::UnknownPile(word.to_string()))?;
            PileId::Tableau(stack - 1)
        }
    };
    Ok(pile)
}

fn parse_index(word: &str) -> Result<usize, ParseError> {
    word.parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .map(|n| n - 1)
        .ok_or_else(|| ParseError::BadIndex(word.to_string()))
}

impl FromStr for InputEvent {
    type Err = ParseError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();

        let simple = match command.as_str() {
            "new" => Some(InputEvent::NewGame),
            "reload" | "load" => Some(InputEvent::Reload),
            "save" => Some(InputEvent::Save),
            "undo" | "u" => Some(InputEvent::Undo),
            "win" => Some(InputEvent::CheckWin),
            "show" | "look" => Some(InputEvent::Show),
            "help" | "?" => Some(InputEvent::Help),
            "quit" | "exit" | "q" => Some(InputEvent::Quit),
            "draw" | "d" => Some(InputEvent::Draw),
            _ => None,
        };

        let event = match simple {
            Some(event) => event,
            None => {
                let gesture: fn(PileId, Option<usize>) -> InputEvent = match command.as_str() {
                    "click" | "c" => |pile, index| InputEvent::Click { pile, index },
                    "dbl" | "home" => |pile, index| InputEvent::DoubleClick { pile, index },
                    "drag" => |pile, index| InputEvent::DragStart { pile, index },
                    "drop" => |pile, index| InputEvent::Drop { pile, index },
                    _ => return Err(ParseError::UnknownCommand(command)),
                };
                let pile = parse_pile(words.next().ok_or(ParseError::MissingPile(command))?)?;
                let index = words.next().map(parse_index).transpose()?;
                gesture(pile, index)
            }
        };

        match words.next() {
            Some(extra) => Err(ParseError::Trailing(extra.to_string())),
            None => Ok(event),
        }
    }
}

/// Command summary shown by `help`.
pub const HELP: &str = "\
Commands:
  new                 shuffle and deal a new game
  reload              replay the saved game
  save                save the moves played so far
  undo                take back the last move
  win                 check whether the game is won
  show                print the table
  quit                leave
Gestures (positions count from 1 at the bottom; omit for the top card):
  draw                turn a stock card, or recycle the waste
  click <pile> [n]    select a card, or play the selection onto it
  dbl <pile> [n]      send a card to its foundation
  drag <pile> [n]     pick up a card and everything on it
  drop <pile> [n]     drop the dragged cards there
Piles: s(tock) w(aste) t1..t7 fs fc fh fd";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_piles() {
        assert_eq!(parse_pile("s"), Ok(PileId::Stock));
        assert_eq!(parse_pile("Waste"), Ok(PileId::Waste));
        assert_eq!(parse_pile("t1"), Ok(PileId::Tableau(0)));
        assert_eq!(parse_pile("t7"), Ok(PileId::Tableau(6)));
        assert_eq!(parse_pile("fh"), Ok(PileId::Foundation(Suit::Heart)));
        assert!(parse_pile("t0").is_err());
        assert!(parse_pile("t8").is_err());
        assert!(parse_pile("bay").is_err());
    }

    #[test]
    fn test_index_is_one_based() {
        assert_eq!(parse_index("1"), Ok(0));
        assert!(parse_index("0").is_err());
        assert!(parse_index("x").is_err());
    }
}
