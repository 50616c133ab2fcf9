use serde::{Deserialize, Serialize};

use crate::models::piece::{Piece, PieceColor, PieceType};

pub const BOARD_ROWS: usize = 10;
pub const BOARD_COLS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    pub fn new(row: i32, col: i32) -> Self {
        Coordinate { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row >= 0
            && (self.row as usize) < BOARD_ROWS
            && self.col >= 0
            && (self.col as usize) < BOARD_COLS
    }

    pub fn offset(&self, row_delta: i32, col_delta: i32) -> Self {
        Coordinate::new(self.row + row_delta, self.col + col_delta)
    }
}

#[derive(Debug)]
pub enum BoardCodecError {
    Malformed(String),
    InvalidShape { rows: usize, cols: Option<usize> },
}

impl std::fmt::Display for BoardCodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardCodecError::Malformed(msg) => write!(f, "Malformed board state: {}", msg),
            BoardCodecError::InvalidShape { rows, cols } => match cols {
                Some(cols) => write!(f, "Invalid board shape: row of {} columns", cols),
                None => write!(f, "Invalid board shape: {} rows", rows),
            },
        }
    }
}

impl std::error::Error for BoardCodecError {}

/// Decoded view of `Game::board_state`. Rebuilt from the blob on every load and
/// never edited locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameBoard {
    pub board: Vec<Vec<Option<Piece>>>,
    #[serde(default)]
    pub captured_pieces: Vec<Piece>,
}

impl Default for GameBoard {
    fn default() -> Self {
        GameBoard::empty()
    }
}

impl GameBoard {
    pub fn empty() -> Self {
        GameBoard {
            board: vec![vec![None; BOARD_COLS]; BOARD_ROWS],
            captured_pieces: Vec::new(),
        }
    }

    /// Opening layout: RED (Han) on the top rows, BLUE (Cho) on the bottom rows.
    pub fn initial() -> Self {
        let mut board = GameBoard::empty();
        let back_rank = [
            (0, PieceType::Chariot),
            (1, PieceType::Horse),
            (2, PieceType::Elephant),
            (3, PieceType::Guard),
            (5, PieceType::Guard),
            (6, PieceType::Elephant),
            (7, PieceType::Horse),
            (8, PieceType::Chariot),
        ];

        for (color, home, palace, cannons, soldiers) in [
            (PieceColor::Red, 0, 1, 2, 3),
            (PieceColor::Blue, 9, 8, 7, 6),
        ] {
            for (col, piece_type) in back_rank {
                board.place(Piece::new(piece_type, color, home, col));
            }
            board.place(Piece::new(PieceType::King, color, palace, 4));
            for col in [1, 7] {
                board.place(Piece::new(PieceType::Cannon, color, cannons, col));
            }
            for col in [0, 2, 4, 6, 8] {
                board.place(Piece::new(PieceType::Soldier, color, soldiers, col));
            }
        }

        board
    }

    /// Parses the server's JSON board blob, rejecting grids that are not 10x9.
    pub fn decode(blob: &str) -> Result<Self, BoardCodecError> {
        let board: GameBoard = serde_json::from_str(blob)
            .map_err(|e| BoardCodecError::Malformed(e.to_string()))?;

        if board.board.len() != BOARD_ROWS {
            return Err(BoardCodecError::InvalidShape {
                rows: board.board.len(),
                cols: None,
            });
        }
        if let Some(row) = board.board.iter().find(|row| row.len() != BOARD_COLS) {
            return Err(BoardCodecError::InvalidShape {
                rows: BOARD_ROWS,
                cols: Some(row.len()),
            });
        }

        Ok(board)
    }

    pub fn encode(&self) -> Result<String, BoardCodecError> {
        serde_json::to_string(self).map_err(|e| BoardCodecError::Malformed(e.to_string()))
    }

    pub fn piece_at(&self, row: i32, col: i32) -> Option<&Piece> {
        if !Coordinate::new(row, col).is_on_board() {
            return None;
        }
        self.board
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .and_then(|cell| cell.as_ref())
    }

    pub fn piece_at_coordinate(&self, coordinate: Coordinate) -> Option<&Piece> {
        self.piece_at(coordinate.row, coordinate.col)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.board.iter().flatten().flatten()
    }

    fn place(&mut self, piece: Piece) {
        let (row, col) = (piece.row as usize, piece.col as usize);
        self.board[row][col] = Some(piece);
    }
}
