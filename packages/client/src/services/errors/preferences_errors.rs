use crate::repositories::errors::api_errors::ApiError;
use crate::repositories::errors::storage_errors::StorageError;

#[derive(Debug)]
pub enum PreferencesError {
    /// The server refused the token; the caller should send the player to login.
    Unauthorized,
    Api(ApiError),
    Storage(StorageError),
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::Unauthorized => write!(f, "Unauthorized"),
            PreferencesError::Api(err) => write!(f, "API error: {}", err),
            PreferencesError::Storage(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for PreferencesError {}

impl From<ApiError> for PreferencesError {
    fn from(err: ApiError) -> Self {
        if err.is_unauthorized() {
            PreferencesError::Unauthorized
        } else {
            PreferencesError::Api(err)
        }
    }
}

impl From<StorageError> for PreferencesError {
    fn from(err: StorageError) -> Self {
        PreferencesError::Storage(err)
    }
}
