use serde::{Deserialize, Serialize};

use crate::models::board::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub player_name: String,
    pub room_title: String,
}

impl CreateGameRequest {
    pub fn new(player_name: &str, room_title: &str) -> Self {
        CreateGameRequest {
            player_name: player_name.to_string(),
            room_title: room_title.to_string(),
        }
    }
}

/// Body shared by the join and leave endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    pub player_name: String,
}

impl PlayerRequest {
    pub fn new(player_name: &str) -> Self {
        PlayerRequest {
            player_name: player_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub player_name: String,
    pub from_row: i32,
    pub from_col: i32,
    pub to_row: i32,
    pub to_col: i32,
}

impl MoveRequest {
    pub fn new(player_name: &str, from: Coordinate, to: Coordinate) -> Self {
        MoveRequest {
            player_name: player_name.to_string(),
            from_row: from.row,
            from_col: from.col,
            to_row: to.row,
            to_col: to.col,
        }
    }

    pub fn from(&self) -> Coordinate {
        Coordinate::new(self.from_row, self.from_col)
    }

    pub fn to(&self) -> Coordinate {
        Coordinate::new(self.to_row, self.to_col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DarkModeResponse {
    pub is_dark_mode: bool,
}
