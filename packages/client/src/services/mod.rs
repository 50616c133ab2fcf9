pub mod derivation;
pub mod errors;
pub mod game_session_service;
pub mod move_rules;
pub mod preferences_service;
pub mod selection;
pub mod session_state;
