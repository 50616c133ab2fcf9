//! Values derived from the session's game plus the local player's identity.
//! Recomputed on every read; nothing here is stored.

use crate::models::game::{Game, GameStatus};
use crate::models::piece::PieceColor;

/// Colour whose seat carries `identity`, or `None` when the game or identity is
/// missing or neither seat matches.
pub fn my_color(game: Option<&Game>, identity: Option<&str>) -> Option<PieceColor> {
    game?.color_of(identity?)
}

pub fn is_my_turn(game: Option<&Game>, identity: Option<&str>) -> bool {
    match (game, my_color(game, identity)) {
        (Some(game), Some(color)) => game.current_turn == color,
        _ => false,
    }
}

pub fn game_status(game: Option<&Game>) -> GameStatus {
    game.map(|g| g.game_status).unwrap_or_default()
}

pub fn is_game_active(game: Option<&Game>) -> bool {
    game_status(game) == GameStatus::InProgress
}
