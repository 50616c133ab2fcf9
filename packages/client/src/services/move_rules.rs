//! Advisory destination sets used to highlight candidate squares.
//!
//! The server re-validates every move; nothing here is allowed to block a move
//! from being sent or to change session state on its own.

use std::collections::HashSet;

use crate::models::board::{Coordinate, GameBoard};
use crate::models::piece::{Piece, PieceColor, PieceType};

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Every square the piece at `from` may move to, ignoring check.
/// Empty when `from` is empty or off the board.
pub fn legal_destinations(board: &GameBoard, from: Coordinate) -> HashSet<Coordinate> {
    let Some(piece) = board.piece_at_coordinate(from) else {
        return HashSet::new();
    };

    let candidates = match piece.piece_type {
        PieceType::King => palace_steps(piece, from, true),
        PieceType::Guard => palace_steps(piece, from, false),
        PieceType::Elephant => elephant_moves(board, piece, from),
        PieceType::Horse => horse_moves(board, from),
        PieceType::Chariot => chariot_moves(board, from),
        PieceType::Cannon => cannon_moves(board, from),
        PieceType::Soldier => soldier_moves(piece, from),
    };

    candidates
        .into_iter()
        .filter(|to| to.is_on_board())
        .filter(|to| {
            board
                .piece_at_coordinate(*to)
                .map_or(true, |target| target.color != piece.color)
        })
        .collect()
}

pub fn is_in_palace(coordinate: Coordinate, color: PieceColor) -> bool {
    let rows = match color {
        PieceColor::Red => 0..=2,
        PieceColor::Blue => 7..=9,
    };
    rows.contains(&coordinate.row) && (3..=5).contains(&coordinate.col)
}

/// Whether `row` lies on the owner's side of the river.
fn is_home_side(row: i32, color: PieceColor) -> bool {
    match color {
        PieceColor::Red => row <= 4,
        PieceColor::Blue => row >= 5,
    }
}

fn forward(color: PieceColor) -> i32 {
    match color {
        PieceColor::Red => 1,
        PieceColor::Blue => -1,
    }
}

/// King moves one step in any direction, guard one diagonal step; both stay
/// inside their own palace.
fn palace_steps(piece: &Piece, from: Coordinate, orthogonal: bool) -> Vec<Coordinate> {
    let mut directions = DIAGONAL.to_vec();
    if orthogonal {
        directions.extend(ORTHOGONAL);
    }
    directions
        .into_iter()
        .map(|(dr, dc)| from.offset(dr, dc))
        .filter(|to| is_in_palace(*to, piece.color))
        .collect()
}

fn elephant_moves(board: &GameBoard, piece: &Piece, from: Coordinate) -> Vec<Coordinate> {
    DIAGONAL
        .iter()
        .filter(|(dr, dc)| board.piece_at_coordinate(from.offset(*dr, *dc)).is_none())
        .map(|(dr, dc)| from.offset(dr * 2, dc * 2))
        .filter(|to| is_home_side(to.row, piece.color))
        .collect()
}

fn horse_moves(board: &GameBoard, from: Coordinate) -> Vec<Coordinate> {
    let mut moves = Vec::new();
    for (dr, dc) in ORTHOGONAL {
        let leg = from.offset(dr, dc);
        if !leg.is_on_board() || board.piece_at_coordinate(leg).is_some() {
            continue;
        }
        if dr == 0 {
            moves.push(from.offset(1, dc * 2));
            moves.push(from.offset(-1, dc * 2));
        } else {
            moves.push(from.offset(dr * 2, 1));
            moves.push(from.offset(dr * 2, -1));
        }
    }
    moves
}

fn chariot_moves(board: &GameBoard, from: Coordinate) -> Vec<Coordinate> {
    let mut moves = Vec::new();
    for (dr, dc) in ORTHOGONAL {
        let mut to = from.offset(dr, dc);
        while to.is_on_board() {
            moves.push(to);
            if board.piece_at_coordinate(to).is_some() {
                break;
            }
            to = to.offset(dr, dc);
        }
    }
    moves
}

/// Slides like a chariot onto empty squares, or jumps exactly one screen to
/// capture the first piece beyond it.
fn cannon_moves(board: &GameBoard, from: Coordinate) -> Vec<Coordinate> {
    let mut moves = Vec::new();
    for (dr, dc) in ORTHOGONAL {
        let mut to = from.offset(dr, dc);
        let mut jumped = false;
        while to.is_on_board() {
            match (board.piece_at_coordinate(to).is_some(), jumped) {
                (false, false) => moves.push(to),
                (true, false) => jumped = true,
                (false, true) => {}
                (true, true) => {
                    moves.push(to);
                    break;
                }
            }
            to = to.offset(dr, dc);
        }
    }
    moves
}

fn soldier_moves(piece: &Piece, from: Coordinate) -> Vec<Coordinate> {
    let mut moves = vec![from.offset(forward(piece.color), 0)];
    if !is_home_side(from.row, piece.color) {
        moves.push(from.offset(0, 1));
        moves.push(from.offset(0, -1));
    }
    moves
}
