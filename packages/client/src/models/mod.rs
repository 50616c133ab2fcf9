pub mod board;
pub mod game;
pub mod game_move;
pub mod piece;
pub mod requests;

pub use board::{Coordinate, GameBoard, BOARD_COLS, BOARD_ROWS};
pub use game::{Game, GameStatus};
pub use game_move::Move;
pub use piece::{Piece, PieceColor, PieceType};
pub use requests::{CreateGameRequest, MoveRequest, PlayerRequest};
