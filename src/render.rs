//! Text projection of the table.
//!
//! Rendering reads the game state and never changes it. Face-down cards
//! show as `##`, selected cards are bracketed.

use strictly_klondike::{Card, GameState, PileId, Suit, TABLEAU_STACKS};
use tracing::instrument;
use unicode_width::UnicodeWidthStr;

const CELL: usize = 6;

fn card_label(card: &Card) -> String {
    if card.is_face_up() {
        card.to_string()
    } else {
        "##".to_string()
    }
}

fn cell(game: &GameState, pile: PileId, index: usize) -> String {
    let cards = game.table().pile(pile).cards();
    let Some(card) = cards.get(index) else {
        return String::new();
    };
    let label = card_label(card);
    let selected = game
        .selection()
        .is_some_and(|sel| sel.covers(pile, index, cards.len()));
    if selected { format!("[{}]", label) } else { label }
}

fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

fn top_cell(game: &GameState, pile: PileId) -> String {
    let len = game.table().pile(pile).len();
    if len == 0 {
        "--".to_string()
    } else {
        cell(game, pile, len - 1)
    }
}

/// Renders the whole table as text.
#[instrument(skip(game), fields(moves = game.history().len()))]
pub fn table_view(game: &GameState) -> String {
    let table = game.table();
    let mut out = String::new();

    out.push_str(&format!(
        "stock {} ({})   waste {} ({})   ",
        if table.stock().is_empty() { "--" } else { "##" },
        table.stock().len(),
        top_cell(game, PileId::Waste),
        table.waste().len(),
    ));
    for suit in [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond] {
        out.push_str(&format!("{}:{} ", suit, top_cell(game, PileId::Foundation(suit))));
    }
    out.push('\n');
    out.push('\n');

    for stack in 0..TABLEAU_STACKS {
        out.push_str(&pad(&format!("t{}", stack + 1), CELL));
    }
    out.push('\n');

    let depth = table.tableau().iter().map(|s| s.len()).max().unwrap_or(0);
    for row in 0..depth {
        let line: String = (0..TABLEAU_STACKS)
            .map(|stack| pad(&cell(game, PileId::Tableau(stack), row), CELL))
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("\nmoves: {}", game.history().len()));
    if game.won() {
        out.push_str("\n*** You won! ***");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_klondike::{Deck, Rank, TableBuilder};

    #[test]
    fn test_new_game_hides_face_down_cards() {
        let view = table_view(&GameState::new(Deck::new()));
        assert!(view.contains("##"));
        assert!(view.contains("stock ## (24)"));
        assert!(view.contains("moves: 0"));
        assert!(!view.contains("You won"));
    }

    #[test]
    fn test_selection_is_bracketed() {
        let mut game = GameState::from_table(
            TableBuilder::new()
                .face_up(0, &[(Suit::Heart, Rank::Ten)])
                .build()
                .expect("layout"),
        );
        game.select(PileId::Tableau(0), 0).expect("select");
        assert!(table_view(&game).contains("[10♥]"));
    }

    #[test]
    fn test_header_tracks_stock_and_waste() {
        let mut game = GameState::new(Deck::new());
        assert!(table_view(&game).starts_with("stock ## (24)   waste -- (0)   "));

        game.draw_from_stock().expect("draw");
        let view = table_view(&game);
        assert!(view.starts_with("stock ## (23)   waste "));
        assert!(view.contains("(1)"));
        assert!(view.ends_with("moves: 1"));
    }

    #[test]
    fn test_win_banner() {
        let game = GameState::from_table(TableBuilder::new().build().expect("layout"));
        assert!(game.won());
        assert!(table_view(&game).contains("You won"));
    }
}
