use async_trait::async_trait;
use reqwest::Method;

use crate::models::game::Game;
use crate::models::game_move::Move;
use crate::models::requests::{CreateGameRequest, MoveRequest, PlayerRequest};
use crate::repositories::errors::api_errors::ApiError;
use crate::repositories::http::ApiClient;

#[cfg(test)]
use mockall::automock;

pub struct HttpGameRepository {
    api: ApiClient,
}

impl HttpGameRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

/// The game server's `/api/game` surface.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, request: &CreateGameRequest) -> Result<Game, ApiError>;
    async fn join_game(&self, game_id: i64, request: &PlayerRequest) -> Result<Game, ApiError>;
    async fn get_game(&self, game_id: i64) -> Result<Game, ApiError>;
    async fn get_history(&self, game_id: i64) -> Result<Vec<Move>, ApiError>;
    async fn get_waiting_games(&self) -> Result<Vec<Game>, ApiError>;
    /// `Ok(None)` when the player has no game in progress.
    async fn get_active_game(&self, player_name: &str) -> Result<Option<Game>, ApiError>;
    async fn make_move(&self, game_id: i64, request: &MoveRequest) -> Result<Game, ApiError>;
    async fn leave_game(&self, game_id: i64, request: &PlayerRequest) -> Result<(), ApiError>;
}

#[async_trait]
impl GameRepository for HttpGameRepository {
    async fn create_game(&self, request: &CreateGameRequest) -> Result<Game, ApiError> {
        let response = self
            .api
            .send(
                self.api
                    .request(Method::POST, "/api/game/create")
                    .json(request),
            )
            .await?;
        ApiClient::read_json(response).await
    }

    async fn join_game(&self, game_id: i64, request: &PlayerRequest) -> Result<Game, ApiError> {
        let path = format!("/api/game/{}/join", game_id);
        let response = self
            .api
            .send(self.api.request(Method::POST, &path).json(request))
            .await?;
        ApiClient::read_json(response).await
    }

    async fn get_game(&self, game_id: i64) -> Result<Game, ApiError> {
        let path = format!("/api/game/{}", game_id);
        let response = self.api.send(self.api.request(Method::GET, &path)).await?;
        ApiClient::read_json(response).await
    }

    async fn get_history(&self, game_id: i64) -> Result<Vec<Move>, ApiError> {
        let path = format!("/api/game/{}/history", game_id);
        let response = self.api.send(self.api.request(Method::GET, &path)).await?;
        ApiClient::read_json(response).await
    }

    async fn get_waiting_games(&self) -> Result<Vec<Game>, ApiError> {
        let response = self
            .api
            .send(self.api.request(Method::GET, "/api/game/waiting"))
            .await?;
        ApiClient::read_json(response).await
    }

    async fn get_active_game(&self, player_name: &str) -> Result<Option<Game>, ApiError> {
        let url = self
            .api
            .url_from_segments(&["api", "game", "active", player_name])?;
        let response = match self.api.send(self.api.request_to(Method::GET, url)).await {
            Ok(response) => response,
            Err(ApiError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let body = ApiClient::read_body(response).await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ApiError::Serialization(e.to_string()))
    }

    async fn make_move(&self, game_id: i64, request: &MoveRequest) -> Result<Game, ApiError> {
        let path = format!("/api/game/{}/move", game_id);
        let response = self
            .api
            .send(self.api.request(Method::POST, &path).json(request))
            .await?;
        ApiClient::read_json(response).await
    }

    async fn leave_game(&self, game_id: i64, request: &PlayerRequest) -> Result<(), ApiError> {
        let path = format!("/api/game/{}/leave", game_id);
        self.api
            .send(self.api.request(Method::POST, &path).json(request))
            .await?;
        Ok(())
    }
}
