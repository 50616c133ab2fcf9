use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceType {
    King,
    Guard,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceColor {
    Red,
    Blue,
}

impl PieceColor {
    pub fn opponent(self) -> Self {
        match self {
            PieceColor::Red => PieceColor::Blue,
            PieceColor::Blue => PieceColor::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub color: PieceColor,
    pub row: i32,
    pub col: i32,
    /// The server writes this flag as `captured`; older payloads use `isCaptured`.
    #[serde(rename = "isCaptured", alias = "captured", default)]
    pub is_captured: bool,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: PieceColor, row: i32, col: i32) -> Self {
        Piece {
            piece_type,
            color,
            row,
            col,
            is_captured: false,
        }
    }
}
