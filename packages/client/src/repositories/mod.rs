pub mod client_storage;
pub mod errors;
pub mod game_repository;
pub mod http;
pub mod preferences_repository;
