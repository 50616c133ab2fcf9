use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::piece::PieceColor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    Waiting,
    InProgress,
    Finished,
    Abandoned,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Finished | GameStatus::Abandoned)
    }
}

/// Authoritative game record as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    #[serde(default)]
    pub room_title: Option<String>,
    pub red_player_name: String,
    /// Filled exactly once, when the second player joins.
    #[serde(default)]
    pub blue_player_name: Option<String>,
    pub current_turn: PieceColor,
    pub game_status: GameStatus,
    #[serde(default)]
    pub winner_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    /// Serialized `GameBoard`, see `GameBoard::decode`.
    #[serde(default)]
    pub board_state: Option<String>,
    #[serde(default)]
    pub move_history: Option<String>,
}

impl Game {
    /// Colour controlled by `player_name` in this game, if they are seated.
    pub fn color_of(&self, player_name: &str) -> Option<PieceColor> {
        if self.red_player_name == player_name {
            Some(PieceColor::Red)
        } else if self.blue_player_name.as_deref() == Some(player_name) {
            Some(PieceColor::Blue)
        } else {
            None
        }
    }

    pub fn player_name(&self, color: PieceColor) -> Option<&str> {
        match color {
            PieceColor::Red => Some(self.red_player_name.as_str()),
            PieceColor::Blue => self.blue_player_name.as_deref(),
        }
    }
}
