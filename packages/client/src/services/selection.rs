use std::collections::HashSet;

use crate::models::board::{Coordinate, GameBoard};
use crate::models::piece::PieceColor;
use crate::services::move_rules;

/// Tentative piece selection and the advisory squares it could move to.
/// Transient: never persisted and never sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Coordinate>,
    candidates: HashSet<Coordinate>,
}

impl Selection {
    pub fn selected(&self) -> Option<Coordinate> {
        self.selected
    }

    pub fn candidates(&self) -> &HashSet<Coordinate> {
        &self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none() && self.candidates.is_empty()
    }

    /// Selects the piece at `at` if it belongs to `my_color` and it is the
    /// local player's turn. Returns whether the selection changed.
    pub fn select(
        &mut self,
        board: Option<&GameBoard>,
        is_my_turn: bool,
        my_color: Option<PieceColor>,
        at: Coordinate,
    ) -> bool {
        let Some(board) = board else {
            return false;
        };
        if !is_my_turn {
            return false;
        }
        match (board.piece_at_coordinate(at), my_color) {
            (Some(piece), Some(color)) if piece.color == color => {}
            _ => return false,
        }

        self.selected = Some(at);
        self.candidates = move_rules::legal_destinations(board, at);
        true
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.candidates.clear();
    }

    pub fn is_selected(&self, at: Coordinate) -> bool {
        self.selected == Some(at)
    }

    pub fn is_valid_move(&self, at: Coordinate) -> bool {
        self.candidates.contains(&at)
    }

    /// Client-side filter only: the server still decides whether the move is legal.
    pub fn can_move_to(&self, board: Option<&GameBoard>, is_my_turn: bool, to: Coordinate) -> bool {
        let Some(from) = self.selected else {
            return false;
        };
        if !is_my_turn {
            return false;
        }
        let Some(board) = board else {
            return false;
        };
        let Some(moving) = board.piece_at_coordinate(from) else {
            return false;
        };

        board
            .piece_at_coordinate(to)
            .map_or(true, |target| target.color != moving.color)
    }
}
