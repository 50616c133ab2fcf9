use std::collections::HashSet;

use colored::*;
use janggi_client::models::{Coordinate, Game, GameBoard, Move, Piece, PieceColor, PieceType};

fn symbol(piece_type: PieceType) -> char {
    match piece_type {
        PieceType::King => 'K',
        PieceType::Guard => 'G',
        PieceType::Elephant => 'E',
        PieceType::Horse => 'H',
        PieceType::Chariot => 'R',
        PieceType::Cannon => 'C',
        PieceType::Soldier => 'S',
    }
}

fn paint(piece: &Piece) -> ColoredString {
    let text = symbol(piece.piece_type).to_string();
    match piece.color {
        PieceColor::Red => text.red().bold(),
        PieceColor::Blue => text.blue().bold(),
    }
}

/// Board as text, row 9 at the top so BLUE sits on the far side.
pub fn board(
    board: &GameBoard,
    selected: Option<Coordinate>,
    candidates: &HashSet<Coordinate>,
) -> String {
    let mut out = String::from("   0 1 2 3 4 5 6 7 8\n");
    for (row, squares) in board.board.iter().enumerate().rev() {
        out.push_str(&format!("{:>2} ", row));
        for (col, square) in squares.iter().enumerate() {
            let at = Coordinate::new(row as i32, col as i32);
            let cell = match square {
                Some(piece) if selected == Some(at) => paint(piece).reversed(),
                Some(piece) if candidates.contains(&at) => paint(piece).underline(),
                Some(piece) => paint(piece),
                None if candidates.contains(&at) => "*".green(),
                None => ".".dimmed(),
            };
            out.push_str(&format!("{} ", cell));
        }
        out.push('\n');
    }
    out
}

pub fn game_summary(game: &Game) -> String {
    let title = game.room_title.as_deref().unwrap_or("(untitled)");
    let blue = game.blue_player_name.as_deref().unwrap_or("-");
    let mut out = format!(
        "#{} {} | {} vs {} | {:?}, {:?} to move",
        game.id,
        title,
        game.red_player_name.red(),
        blue.blue(),
        game.game_status,
        game.current_turn
    );
    if game.game_status.is_terminal() {
        let winner = game.winner_name.as_deref().unwrap_or("none");
        out.push_str(&format!(" | winner: {}", winner.bold()));
    }
    out
}

pub fn history_line(entry: &Move) -> String {
    let capture = entry
        .captured_piece_type
        .map(|captured| format!(" x{}", symbol(captured)))
        .unwrap_or_default();
    format!(
        "{:>3}. {} {} ({},{}) -> ({},{}){}",
        entry.move_number,
        entry.player_name,
        symbol(entry.piece_type),
        entry.from_row,
        entry.from_col,
        entry.to_row,
        entry.to_col,
        capture
    )
}
