use tracing::error;

use crate::models::board::GameBoard;
use crate::models::game::Game;
use crate::models::game_move::Move;
use crate::services::selection::Selection;

pub const BOARD_DECODE_FAILED: &str = "Unable to load the board state.";

/// Everything the session knows about the active game. Only
/// `GameSessionService` writes to it; everyone else reads snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) current_game: Option<Game>,
    pub(crate) game_board: Option<GameBoard>,
    pub(crate) move_history: Vec<Move>,
    pub(crate) waiting_games: Vec<Game>,
    pub(crate) is_loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) selection: Selection,
}

impl SessionState {
    pub fn current_game(&self) -> Option<&Game> {
        self.current_game.as_ref()
    }

    pub fn game_board(&self) -> Option<&GameBoard> {
        self.game_board.as_ref()
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn waiting_games(&self) -> &[Game] {
        &self.waiting_games
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_empty(&self) -> bool {
        *self == SessionState::default()
    }

    pub(crate) fn reset(&mut self) {
        *self = SessionState::default();
    }

    /// Replaces the current game and re-derives everything hanging off it.
    pub(crate) fn install_game(&mut self, game: Game) {
        let switched = self.current_game.as_ref().map(|g| g.id) != Some(game.id);
        self.current_game = Some(game);
        if switched {
            self.move_history.clear();
        }
        self.selection.clear();
        self.refresh_board();
    }

    /// Decodes the current game's board blob. A blob that fails to decode keeps
    /// the previous board and records a message instead.
    pub(crate) fn refresh_board(&mut self) {
        let blob = self
            .current_game
            .as_ref()
            .and_then(|game| game.board_state.as_deref())
            .filter(|blob| !blob.trim().is_empty());

        let Some(blob) = blob else {
            self.game_board = None;
            return;
        };

        match GameBoard::decode(blob) {
            Ok(board) => self.game_board = Some(board),
            Err(e) => {
                error!("Failed to decode board state: {}", e);
                self.error = Some(BOARD_DECODE_FAILED.to_string());
            }
        }
    }
}
