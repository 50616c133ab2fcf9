use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use crate::models::board::{Coordinate, GameBoard};
use crate::models::game::{Game, GameStatus};
use crate::models::game_move::Move;
use crate::models::piece::PieceColor;
use crate::models::requests::{CreateGameRequest, MoveRequest, PlayerRequest};
use crate::repositories::client_storage::ClientStorage;
use crate::repositories::errors::api_errors::ApiError;
use crate::repositories::game_repository::GameRepository;
use crate::services::derivation;
use crate::services::errors::session_errors::SessionError;
use crate::services::session_state::SessionState;

pub const CREATE_FAILED: &str = "Failed to create the game.";
pub const JOIN_FAILED: &str = "Failed to join the game.";
pub const LOAD_FAILED: &str = "Failed to load the game.";
pub const CURRENT_FAILED: &str = "Failed to load the current game.";
pub const MOVE_FAILED: &str = "Failed to make the move.";
pub const LEAVE_FAILED: &str = "Failed to leave the game.";

struct Inner {
    state: SessionState,
    /// Ticket of the most recently started request.
    issued: u64,
    /// Ticket of the newest response written to the state, or of the last
    /// reset. A response older than this is dropped.
    applied: u64,
    /// Value of `issued` at the last reset. Requests started before it carry
    /// a smaller ticket.
    cleared: u64,
    in_flight: usize,
}

impl Inner {
    fn is_superseded(&self, ticket: u64) -> bool {
        self.applied > ticket
    }

    /// Marks everything issued so far as superseded.
    fn supersede_all(&mut self) {
        self.issued += 1;
        self.applied = self.issued;
    }
}

/// Owns the session state for one active game and is its only writer.
pub struct GameSessionService {
    repository: Arc<dyn GameRepository>,
    storage: Arc<dyn ClientStorage>,
    inner: RwLock<Inner>,
}

/// Releases the action's hold on the loading flag, whichever way it exits.
struct LoadingGuard<'a> {
    service: &'a GameSessionService,
    ticket: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.service.inner.write();
        if self.ticket < inner.cleared {
            return;
        }
        inner.in_flight = inner.in_flight.saturating_sub(1);
        inner.state.is_loading = inner.in_flight > 0;
    }
}

impl GameSessionService {
    pub fn new(repository: Arc<dyn GameRepository>, storage: Arc<dyn ClientStorage>) -> Self {
        GameSessionService {
            repository,
            storage,
            inner: RwLock::new(Inner {
                state: SessionState::default(),
                issued: 0,
                applied: 0,
                cleared: 0,
                in_flight: 0,
            }),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.read().state.clone()
    }

    pub fn current_game(&self) -> Option<Game> {
        self.inner.read().state.current_game.clone()
    }

    pub fn game_board(&self) -> Option<GameBoard> {
        self.inner.read().state.game_board.clone()
    }

    pub fn move_history(&self) -> Vec<Move> {
        self.inner.read().state.move_history.clone()
    }

    pub fn waiting_games(&self) -> Vec<Game> {
        self.inner.read().state.waiting_games.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().state.is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.read().state.error.clone()
    }

    pub fn selected_piece(&self) -> Option<Coordinate> {
        self.inner.read().state.selection.selected()
    }

    pub fn valid_moves(&self) -> HashSet<Coordinate> {
        self.inner.read().state.selection.candidates().clone()
    }

    /// The local player's name from client storage.
    pub fn identity(&self) -> Option<String> {
        match self.storage.player_name() {
            Ok(name) => name.filter(|n| !n.is_empty()),
            Err(e) => {
                warn!("Could not read player name: {}", e);
                None
            }
        }
    }

    pub fn my_color(&self) -> Option<PieceColor> {
        let identity = self.identity();
        let inner = self.inner.read();
        derivation::my_color(inner.state.current_game.as_ref(), identity.as_deref())
    }

    pub fn is_my_turn(&self) -> bool {
        let identity = self.identity();
        let inner = self.inner.read();
        derivation::is_my_turn(inner.state.current_game.as_ref(), identity.as_deref())
    }

    pub fn game_status(&self) -> GameStatus {
        derivation::game_status(self.inner.read().state.current_game.as_ref())
    }

    pub fn is_game_active(&self) -> bool {
        derivation::is_game_active(self.inner.read().state.current_game.as_ref())
    }

    pub fn select_piece(&self, row: i32, col: i32) -> bool {
        let identity = self.identity();
        let mut inner = self.inner.write();
        let state = &mut inner.state;
        let game = state.current_game.as_ref();
        let can_act = derivation::is_game_active(game)
            && derivation::is_my_turn(game, identity.as_deref());
        let color = derivation::my_color(game, identity.as_deref());

        state.selection.select(
            state.game_board.as_ref(),
            can_act,
            color,
            Coordinate::new(row, col),
        )
    }

    pub fn deselect_piece(&self) {
        self.inner.write().state.selection.clear();
    }

    pub fn is_selected(&self, row: i32, col: i32) -> bool {
        self.inner
            .read()
            .state
            .selection
            .is_selected(Coordinate::new(row, col))
    }

    pub fn is_valid_move(&self, row: i32, col: i32) -> bool {
        self.inner
            .read()
            .state
            .selection
            .is_valid_move(Coordinate::new(row, col))
    }

    pub fn can_move_to(&self, row: i32, col: i32) -> bool {
        let identity = self.identity();
        let inner = self.inner.read();
        let state = &inner.state;
        let game = state.current_game.as_ref();
        let can_act = derivation::is_game_active(game)
            && derivation::is_my_turn(game, identity.as_deref());

        state
            .selection
            .can_move_to(state.game_board.as_ref(), can_act, Coordinate::new(row, col))
    }

    pub async fn create_game(&self, player_name: &str, room_title: &str) -> Result<(), SessionError> {
        let ticket = self.begin_action();
        let _loading = LoadingGuard {
            service: self,
            ticket,
        };

        let request = CreateGameRequest::new(player_name, room_title);
        let game = self
            .repository
            .create_game(&request)
            .await
            .map_err(|e| self.fail(ticket, e, CREATE_FAILED))?;

        info!(game_id = game.id, "Created game for {}", player_name);
        self.apply(ticket, |state| state.install_game(game));
        Ok(())
    }

    pub async fn join_game(&self, game_id: i64, player_name: &str) -> Result<(), SessionError> {
        let ticket = self.begin_action();
        let _loading = LoadingGuard {
            service: self,
            ticket,
        };

        let request = PlayerRequest::new(player_name);
        let game = self
            .repository
            .join_game(game_id, &request)
            .await
            .map_err(|e| self.fail(ticket, e, JOIN_FAILED))?;

        info!(game_id, "{} joined game", player_name);
        self.apply(ticket, |state| state.install_game(game));
        Ok(())
    }

    pub async fn load_game(&self, game_id: i64) -> Result<(), SessionError> {
        let ticket = self.begin_action();
        let _loading = LoadingGuard {
            service: self,
            ticket,
        };

        let game = self
            .repository
            .get_game(game_id)
            .await
            .map_err(|e| self.fail(ticket, e, LOAD_FAILED))?;

        debug!(game_id, "Loaded game");
        if self.apply(ticket, |state| state.install_game(game)) {
            self.refresh_history(ticket, game_id).await;
        }
        Ok(())
    }

    /// Re-decodes the current game's board blob.
    pub fn load_game_board(&self) {
        self.inner.write().state.refresh_board();
    }

    /// Failures are logged only; history is not needed to keep playing.
    pub async fn load_move_history(&self, game_id: i64) {
        let ticket = self.inner.read().issued;
        self.refresh_history(ticket, game_id).await;
    }

    /// Failures are logged only and leave the previous list in place.
    pub async fn load_waiting_games(&self) {
        let ticket = self.inner.read().issued;
        match self.repository.get_waiting_games().await {
            Ok(games) => {
                debug!("Loaded {} waiting games", games.len());
                let mut inner = self.inner.write();
                if ticket < inner.cleared {
                    debug!(ticket, "Dropping waiting list requested before a reset");
                } else {
                    inner.state.waiting_games = games;
                }
            }
            Err(e) => error!("Failed to load waiting games: {}", e),
        }
    }

    /// Loads the local player's game in progress, if any. Having none is not an
    /// error and leaves the current game alone.
    pub async fn load_current_game(&self) -> Result<(), SessionError> {
        let Some(player_name) = self.identity() else {
            debug!("No player name stored, skipping active game lookup");
            return Ok(());
        };

        let ticket = self.begin_action();
        let _loading = LoadingGuard {
            service: self,
            ticket,
        };

        match self.repository.get_active_game(&player_name).await {
            Ok(Some(game)) => {
                let game_id = game.id;
                info!(game_id, "Resumed active game for {}", player_name);
                if self.apply(ticket, |state| state.install_game(game)) {
                    self.refresh_history(ticket, game_id).await;
                }
                Ok(())
            }
            Ok(None) | Err(ApiError::NotFound(_)) => {
                debug!("No active game for {}", player_name);
                Ok(())
            }
            Err(e) => Err(self.fail(ticket, e, CURRENT_FAILED)),
        }
    }

    /// Sends the move and adopts the server's resulting game. On failure the
    /// selection is left as it was.
    pub async fn make_move(&self, request: MoveRequest) -> Result<(), SessionError> {
        let Some(game_id) = self.inner.read().state.current_game.as_ref().map(|g| g.id) else {
            debug!("make_move called without a loaded game");
            return Ok(());
        };

        let ticket = self.begin_action();
        let _loading = LoadingGuard {
            service: self,
            ticket,
        };

        let game = self
            .repository
            .make_move(game_id, &request)
            .await
            .map_err(|e| self.fail(ticket, e, MOVE_FAILED))?;

        info!(
            game_id,
            from = ?request.from(),
            to = ?request.to(),
            "Move accepted"
        );
        if self.apply(ticket, |state| state.install_game(game)) {
            self.refresh_history(ticket, game_id).await;
        }
        Ok(())
    }

    /// Gives up the local seat in the current game and resets the session.
    pub async fn leave_game(&self, player_name: &str) -> Result<(), SessionError> {
        let Some(game_id) = self.inner.read().state.current_game.as_ref().map(|g| g.id) else {
            debug!("leave_game called without a loaded game");
            return Ok(());
        };

        let ticket = self.begin_action();
        let _loading = LoadingGuard {
            service: self,
            ticket,
        };

        self.repository
            .leave_game(game_id, &PlayerRequest::new(player_name))
            .await
            .map_err(|e| self.fail(ticket, e, LEAVE_FAILED))?;

        info!(game_id, "{} left game", player_name);
        let mut inner = self.inner.write();
        if inner.is_superseded(ticket) {
            warn!(ticket, "Not resetting after leave, a newer response already applied");
        } else {
            Self::clear(&mut inner);
        }
        Ok(())
    }

    /// Installs a game obtained elsewhere, superseding any request in flight.
    pub fn set_current_game(&self, game: Game) {
        let mut inner = self.inner.write();
        inner.supersede_all();
        inner.state.install_game(game);
    }

    /// Back to the empty session. Every response still in flight, game or
    /// waiting list, is dropped when it lands.
    pub fn reset_game(&self) {
        Self::clear(&mut self.inner.write());
    }

    fn clear(inner: &mut Inner) {
        inner.supersede_all();
        inner.cleared = inner.issued;
        inner.in_flight = 0;
        inner.state.reset();
    }

    fn begin_action(&self) -> u64 {
        let mut inner = self.inner.write();
        inner.issued += 1;
        inner.in_flight += 1;
        inner.state.is_loading = true;
        inner.state.error = None;
        inner.issued
    }

    /// Installs a response unless a newer one was applied, or the session was
    /// reset, after this request started. Returns whether it was applied.
    fn apply<F>(&self, ticket: u64, update: F) -> bool
    where
        F: FnOnce(&mut SessionState),
    {
        let mut inner = self.inner.write();
        if inner.is_superseded(ticket) {
            warn!(
                ticket,
                applied = inner.applied,
                "Discarding response for a superseded request"
            );
            return false;
        }
        inner.applied = ticket;
        update(&mut inner.state);
        true
    }

    /// Like `apply`, but does not supersede older requests still in flight.
    fn write_if_current<F>(&self, ticket: u64, update: F) -> bool
    where
        F: FnOnce(&mut SessionState),
    {
        let mut inner = self.inner.write();
        if inner.is_superseded(ticket) {
            debug!(ticket, applied = inner.applied, "Dropping superseded result");
            return false;
        }
        update(&mut inner.state);
        true
    }

    fn fail(&self, ticket: u64, cause: ApiError, fallback: &str) -> SessionError {
        let failure = SessionError::from_api(&cause, fallback);
        error!("{}: {}", fallback, cause);
        self.write_if_current(ticket, |state| state.error = Some(failure.message.clone()));
        failure
    }

    async fn refresh_history(&self, ticket: u64, game_id: i64) {
        match self.repository.get_history(game_id).await {
            Ok(moves) => {
                debug!(game_id, "Loaded {} history entries", moves.len());
                self.write_if_current(ticket, |state| state.move_history = moves);
            }
            Err(e) => error!(game_id, "Failed to load move history: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game_move::Move;
    use crate::models::piece::PieceType;
    use crate::repositories::client_storage::InMemoryClientStorage;
    use crate::repositories::game_repository::MockGameRepository;
    use crate::services::errors::session_errors::SessionErrorKind;
    use crate::services::session_state::BOARD_DECODE_FAILED;

    fn game(id: i64, turn: PieceColor, status: GameStatus) -> Game {
        Game {
            id,
            room_title: Some("Room".to_string()),
            red_player_name: "A".to_string(),
            blue_player_name: Some("B".to_string()),
            current_turn: turn,
            game_status: status,
            winner_name: None,
            created_at: None,
            updated_at: None,
            board_state: GameBoard::initial().encode().ok(),
            move_history: None,
        }
    }

    fn soldier_move(game_id: i64, number: i32) -> Move {
        Move {
            id: Some(number as i64),
            game_id,
            player_name: "A".to_string(),
            from_row: 3,
            from_col: 0,
            to_row: 4,
            to_col: 0,
            piece_type: PieceType::Soldier,
            piece_color: PieceColor::Red,
            captured_piece_type: None,
            move_number: number,
            created_at: None,
        }
    }

    fn service_for(repository: MockGameRepository, player_name: Option<&str>) -> GameSessionService {
        let storage = match player_name {
            Some(name) => InMemoryClientStorage::with_player_name(name),
            None => InMemoryClientStorage::new(),
        };
        GameSessionService::new(Arc::new(repository), Arc::new(storage))
    }

    fn rejected(status: u16, message: Option<&str>) -> ApiError {
        ApiError::Rejected {
            status,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_fresh_session_is_empty() {
        let service = service_for(MockGameRepository::new(), Some("A"));

        assert!(service.snapshot().is_empty());
        assert_eq!(service.my_color(), None);
        assert!(!service.is_my_turn());
        assert_eq!(service.game_status(), GameStatus::Waiting);
        assert!(!service.is_game_active());
        assert!(!service.select_piece(3, 0));
    }

    #[tokio::test]
    async fn test_create_game_installs_waiting_game() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_create_game()
            .withf(|request| request.player_name == "A" && request.room_title == "Room")
            .times(1)
            .returning(|_| {
                let mut created = game(7, PieceColor::Red, GameStatus::Waiting);
                created.blue_player_name = None;
                Ok(created)
            });
        let service = service_for(repository, Some("A"));

        let result = service.create_game("A", "Room").await;

        assert!(result.is_ok());
        let current = service.current_game().unwrap();
        assert_eq!(current.id, 7);
        assert_eq!(current.red_player_name, "A");
        assert!(current.blue_player_name.is_none());
        assert_eq!(service.game_status(), GameStatus::Waiting);
        assert_eq!(service.game_board(), Some(GameBoard::initial()));
        assert_eq!(service.my_color(), Some(PieceColor::Red));
        assert!(!service.is_game_active());
        assert!(!service.is_loading());
        assert!(service.error().is_none());
    }

    #[tokio::test]
    async fn test_join_game_starts_play() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_join_game()
            .withf(|id, request| *id == 7 && request.player_name == "B")
            .times(1)
            .returning(|id, _| Ok(game(id, PieceColor::Red, GameStatus::InProgress)));
        let service = service_for(repository, Some("B"));

        service.join_game(7, "B").await.unwrap();

        let current = service.current_game().unwrap();
        assert_eq!(current.blue_player_name.as_deref(), Some("B"));
        assert_eq!(service.game_status(), GameStatus::InProgress);
        assert_eq!(service.my_color(), Some(PieceColor::Blue));
        assert!(!service.is_my_turn());
    }

    #[tokio::test]
    async fn test_join_game_rejection_surfaces_server_message() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_join_game()
            .withf(|id, request| *id == 7 && request.player_name == "B")
            .times(1)
            .returning(|_, _| Err(rejected(409, Some("Game is full."))));
        let service = service_for(repository, Some("B"));

        let error = service.join_game(7, "B").await.unwrap_err();

        assert_eq!(error.kind, SessionErrorKind::Rejected);
        assert_eq!(error.message, "Game is full.");
        assert_eq!(service.error().as_deref(), Some("Game is full."));
        assert!(service.current_game().is_none());
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn test_transport_failure_uses_fallback_message() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_get_game()
            .returning(|_| Err(ApiError::Transport("connection refused".to_string())));
        let service = service_for(repository, Some("A"));

        let error = service.load_game(3).await.unwrap_err();

        assert_eq!(error.kind, SessionErrorKind::Transport);
        assert_eq!(service.error().as_deref(), Some(LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_load_game_fetches_history() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_get_game()
            .withf(|id| *id == 3)
            .returning(|id| Ok(game(id, PieceColor::Blue, GameStatus::InProgress)));
        repository
            .expect_get_history()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|id| Ok(vec![soldier_move(id, 1)]));
        let service = service_for(repository, Some("B"));

        service.load_game(3).await.unwrap();

        assert_eq!(service.move_history().len(), 1);
        assert!(service.is_my_turn());
        assert!(service.is_game_active());
    }

    #[tokio::test]
    async fn test_history_failure_keeps_game() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_get_game()
            .returning(|id| Ok(game(id, PieceColor::Red, GameStatus::InProgress)));
        repository
            .expect_get_history()
            .returning(|_| Err(ApiError::Transport("timeout".to_string())));
        let service = service_for(repository, Some("A"));

        let result = service.load_game(3).await;

        assert!(result.is_ok());
        assert!(service.current_game().is_some());
        assert!(service.move_history().is_empty());
        assert!(service.error().is_none());
    }

    #[tokio::test]
    async fn test_load_current_game_without_active_game() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_get_active_game()
            .withf(|name| name == "A")
            .times(1)
            .returning(|_| Ok(None));
        let service = service_for(repository, Some("A"));
        service.set_current_game(game(9, PieceColor::Red, GameStatus::InProgress));

        let result = service.load_current_game().await;

        assert!(result.is_ok());
        assert_eq!(service.current_game().map(|g| g.id), Some(9));
        assert!(service.error().is_none());
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn test_load_current_game_not_found_is_not_an_error() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_get_active_game()
            .returning(|_| Err(ApiError::NotFound(None)));
        let service = service_for(repository, Some("A"));

        assert!(service.load_current_game().await.is_ok());
        assert!(service.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_load_current_game_server_error_is_raised() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_get_active_game()
            .returning(|_| Err(rejected(500, None)));
        let service = service_for(repository, Some("A"));

        let error = service.load_current_game().await.unwrap_err();

        assert_eq!(error.status, Some(500));
        assert_eq!(service.error().as_deref(), Some(CURRENT_FAILED));
    }

    #[tokio::test]
    async fn test_load_current_game_resumes_game() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_get_active_game()
            .returning(|_| Ok(Some(game(4, PieceColor::Red, GameStatus::InProgress))));
        repository
            .expect_get_history()
            .returning(|id| Ok(vec![soldier_move(id, 1), soldier_move(id, 2)]));
        let service = service_for(repository, Some("A"));

        service.load_current_game().await.unwrap();

        assert_eq!(service.current_game().map(|g| g.id), Some(4));
        assert_eq!(service.move_history().len(), 2);
    }

    #[tokio::test]
    async fn test_load_current_game_skips_lookup_without_identity() {
        let service = service_for(MockGameRepository::new(), None);

        assert!(service.load_current_game().await.is_ok());
        assert!(service.snapshot().is_empty());
    }

    #[test]
    fn test_select_piece_respects_turn_and_ownership() {
        let service = service_for(MockGameRepository::new(), Some("A"));
        service.set_current_game(game(1, PieceColor::Red, GameStatus::InProgress));

        assert!(!service.select_piece(6, 0));
        assert!(service.selected_piece().is_none());

        assert!(service.select_piece(3, 0));
        assert!(service.is_selected(3, 0));
        assert!(service.is_valid_move(4, 0));
        assert!(service.can_move_to(4, 0));
        assert!(!service.can_move_to(3, 2));

        service.deselect_piece();
        assert!(service.selected_piece().is_none());
        assert!(service.valid_moves().is_empty());
    }

    #[test]
    fn test_select_piece_is_noop_on_opponent_turn_or_finished_game() {
        let service = service_for(MockGameRepository::new(), Some("A"));

        service.set_current_game(game(1, PieceColor::Blue, GameStatus::InProgress));
        assert!(!service.select_piece(3, 0));

        service.set_current_game(game(1, PieceColor::Red, GameStatus::Finished));
        assert!(!service.select_piece(3, 0));
        assert!(service.valid_moves().is_empty());
    }

    #[tokio::test]
    async fn test_make_move_adopts_server_game_and_clears_selection() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_make_move()
            .withf(|id, request| {
                *id == 1
                    && request.player_name == "A"
                    && request.from() == Coordinate::new(3, 0)
                    && request.to() == Coordinate::new(4, 0)
            })
            .times(1)
            .returning(|id, _| {
                let mut after = game(id, PieceColor::Blue, GameStatus::InProgress);
                let mut board = GameBoard::initial();
                let mut soldier = board.board[3][0].take();
                if let Some(piece) = soldier.as_mut() {
                    piece.row = 4;
                }
                board.board[4][0] = soldier;
                after.board_state = board.encode().ok();
                Ok(after)
            });
        repository
            .expect_get_history()
            .returning(|id| Ok(vec![soldier_move(id, 1)]));
        let service = service_for(repository, Some("A"));
        service.set_current_game(game(1, PieceColor::Red, GameStatus::InProgress));
        service.select_piece(3, 0);

        let request = MoveRequest::new("A", Coordinate::new(3, 0), Coordinate::new(4, 0));
        service.make_move(request).await.unwrap();

        let board = service.game_board().unwrap();
        assert!(board.piece_at(3, 0).is_none());
        assert_eq!(
            board.piece_at(4, 0).map(|p| p.piece_type),
            Some(PieceType::Soldier)
        );
        assert!(service.selected_piece().is_none());
        assert!(service.valid_moves().is_empty());
        assert!(service.error().is_none());
        assert!(!service.is_my_turn());
        assert_eq!(service.move_history().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_move_keeps_selection_and_game() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_make_move()
            .returning(|_, _| Err(rejected(409, Some("Not your turn."))));
        let service = service_for(repository, Some("A"));
        service.set_current_game(game(1, PieceColor::Red, GameStatus::InProgress));
        service.select_piece(3, 0);
        let before = service.current_game();

        let request = MoveRequest::new("A", Coordinate::new(3, 0), Coordinate::new(5, 0));
        let error = service.make_move(request).await.unwrap_err();

        assert_eq!(error.message, "Not your turn.");
        assert_eq!(service.error().as_deref(), Some("Not your turn."));
        assert_eq!(service.current_game(), before);
        assert_eq!(service.selected_piece(), Some(Coordinate::new(3, 0)));
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn test_make_move_without_game_is_noop() {
        let service = service_for(MockGameRepository::new(), Some("A"));

        let request = MoveRequest::new("A", Coordinate::new(3, 0), Coordinate::new(4, 0));

        assert!(service.make_move(request).await.is_ok());
        assert!(service.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_leave_game_resets_session() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_leave_game()
            .withf(|id, request| *id == 1 && request.player_name == "A")
            .times(1)
            .returning(|_, _| Ok(()));
        let service = service_for(repository, Some("A"));
        service.set_current_game(game(1, PieceColor::Red, GameStatus::InProgress));

        service.leave_game("A").await.unwrap();

        assert!(service.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_load_waiting_games_failure_keeps_previous_list() {
        let mut repository = MockGameRepository::new();
        repository
            .expect_get_waiting_games()
            .times(1)
            .returning(|| Ok(vec![game(2, PieceColor::Red, GameStatus::Waiting)]));
        repository
            .expect_get_waiting_games()
            .returning(|| Err(ApiError::Transport("down".to_string())));
        let service = service_for(repository, None);

        service.load_waiting_games().await;
        service.load_waiting_games().await;

        assert_eq!(service.waiting_games().len(), 1);
        assert!(service.error().is_none());
    }

    #[test]
    fn test_undecodable_board_keeps_previous_board() {
        let service = service_for(MockGameRepository::new(), Some("A"));
        service.set_current_game(game(1, PieceColor::Red, GameStatus::InProgress));

        let mut broken = game(1, PieceColor::Blue, GameStatus::InProgress);
        broken.board_state = Some("not a board".to_string());
        service.set_current_game(broken);

        assert_eq!(service.game_board(), Some(GameBoard::initial()));
        assert_eq!(service.error().as_deref(), Some(BOARD_DECODE_FAILED));
        assert_eq!(service.current_game().map(|g| g.current_turn), Some(PieceColor::Blue));
    }

    #[test]
    fn test_load_game_board_redecodes_current_blob() {
        let service = service_for(MockGameRepository::new(), Some("A"));
        service.set_current_game(game(1, PieceColor::Red, GameStatus::InProgress));

        service.load_game_board();

        assert_eq!(service.game_board(), Some(GameBoard::initial()));
    }

    #[test]
    fn test_reset_game_clears_everything() {
        let service = service_for(MockGameRepository::new(), Some("A"));
        service.set_current_game(game(1, PieceColor::Red, GameStatus::InProgress));
        service.select_piece(3, 0);

        service.reset_game();

        assert!(service.snapshot().is_empty());
        assert!(!service.is_selected(3, 0));
    }
}
