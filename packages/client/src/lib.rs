//! Session state and move orchestration for a Janggi game client.
//!
//! [`GameSessionService`] owns everything the client knows about the active
//! game and talks to the game server through a [`GameRepository`]. The board
//! shown to the player is always the server's; local move rules only decide
//! which squares to highlight.

pub mod config;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::{ClientConfig, ConfigError};
pub use repositories::client_storage::{ClientStorage, FileClientStorage, InMemoryClientStorage};
pub use repositories::errors::api_errors::ApiError;
pub use repositories::game_repository::{GameRepository, HttpGameRepository};
pub use repositories::http::ApiClient;
pub use repositories::preferences_repository::{HttpPreferencesRepository, PreferencesRepository};
pub use services::errors::preferences_errors::PreferencesError;
pub use services::errors::session_errors::{SessionError, SessionErrorKind};
pub use services::game_session_service::GameSessionService;
pub use services::preferences_service::PreferencesService;
pub use services::session_state::SessionState;
