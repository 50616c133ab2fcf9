pub mod preferences_errors;
pub mod session_errors;
