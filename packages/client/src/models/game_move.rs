use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::board::Coordinate;
use crate::models::piece::{PieceColor, PieceType};

/// One entry of a game's move history. The server assigns `move_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    #[serde(default)]
    pub id: Option<i64>,
    pub game_id: i64,
    pub player_name: String,
    pub from_row: i32,
    pub from_col: i32,
    pub to_row: i32,
    pub to_col: i32,
    pub piece_type: PieceType,
    pub piece_color: PieceColor,
    #[serde(default)]
    pub captured_piece_type: Option<PieceType>,
    pub move_number: i32,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Move {
    pub fn from(&self) -> Coordinate {
        Coordinate::new(self.from_row, self.from_col)
    }

    pub fn to(&self) -> Coordinate {
        Coordinate::new(self.to_row, self.to_col)
    }

    pub fn is_capture(&self) -> bool {
        self.captured_piece_type.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_deserializes_history_entry() {
        let json = r#"{
            "id": 3,
            "gameId": 7,
            "playerName": "A",
            "fromRow": 3,
            "fromCol": 0,
            "toRow": 4,
            "toCol": 0,
            "pieceType": "SOLDIER",
            "pieceColor": "RED",
            "capturedPieceType": "CANNON",
            "moveNumber": 1,
            "createdAt": "2025-03-01T10:16:00.5"
        }"#;

        let entry: Move = serde_json::from_str(json).unwrap();

        assert_eq!(entry.from(), Coordinate::new(3, 0));
        assert_eq!(entry.to(), Coordinate::new(4, 0));
        assert_eq!(entry.captured_piece_type, Some(PieceType::Cannon));
        assert!(entry.is_capture());
        assert_eq!(entry.move_number, 1);
    }

    #[test]
    fn test_move_without_capture() {
        let json = r#"{"gameId":7,"playerName":"B","fromRow":6,"fromCol":0,"toRow":5,"toCol":0,
            "pieceType":"SOLDIER","pieceColor":"BLUE","capturedPieceType":null,"moveNumber":2}"#;

        let entry: Move = serde_json::from_str(json).unwrap();

        assert!(!entry.is_capture());
        assert!(entry.id.is_none());
    }
}
