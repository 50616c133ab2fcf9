#![allow(dead_code)]

use std::sync::Arc;

use janggi_client::models::GameBoard;
use janggi_client::{
    ApiClient, ClientStorage, GameSessionService, HttpGameRepository, InMemoryClientStorage,
};
use serde_json::{json, Value};
use wiremock::MockServer;

pub fn storage_for(player_name: &str, token: Option<&str>) -> Arc<InMemoryClientStorage> {
    let storage = Arc::new(InMemoryClientStorage::with_player_name(player_name));
    storage
        .set_auth_token(token)
        .expect("in-memory storage never fails");
    storage
}

pub fn api_client(server: &MockServer, storage: Arc<InMemoryClientStorage>) -> ApiClient {
    ApiClient::new(reqwest::Client::new(), &server.uri(), storage)
}

pub fn repository(server: &MockServer, storage: Arc<InMemoryClientStorage>) -> HttpGameRepository {
    HttpGameRepository::new(api_client(server, storage))
}

pub fn session(server: &MockServer, player_name: &str) -> Arc<GameSessionService> {
    let storage = storage_for(player_name, None);
    Arc::new(GameSessionService::new(
        Arc::new(repository(server, storage.clone())),
        storage,
    ))
}

pub fn initial_blob() -> String {
    GameBoard::initial()
        .encode()
        .expect("initial board encodes")
}

pub fn game_json(id: i64, turn: &str, status: &str) -> Value {
    json!({
        "id": id,
        "roomTitle": "Room",
        "redPlayerName": "A",
        "bluePlayerName": "B",
        "currentTurn": turn,
        "gameStatus": status,
        "winnerName": null,
        "createdAt": "2025-03-01T10:00:00",
        "updatedAt": "2025-03-01T10:05:00",
        "boardState": initial_blob(),
        "moveHistory": null
    })
}

pub fn move_json(game_id: i64, number: i32) -> Value {
    json!({
        "id": number,
        "gameId": game_id,
        "playerName": "A",
        "fromRow": 3,
        "fromCol": 0,
        "toRow": 4,
        "toCol": 0,
        "pieceType": "SOLDIER",
        "pieceColor": "RED",
        "capturedPieceType": null,
        "moveNumber": number,
        "createdAt": "2025-03-01T10:06:00"
    })
}
