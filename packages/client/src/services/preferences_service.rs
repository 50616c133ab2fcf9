use std::sync::Arc;

use tracing::{info, warn};

use crate::repositories::client_storage::ClientStorage;
use crate::repositories::preferences_repository::PreferencesRepository;
use crate::services::errors::preferences_errors::PreferencesError;

/// Dark-mode preference: cached locally, owned by the server.
pub struct PreferencesService {
    repository: Arc<dyn PreferencesRepository>,
    storage: Arc<dyn ClientStorage>,
}

impl PreferencesService {
    pub fn new(repository: Arc<dyn PreferencesRepository>, storage: Arc<dyn ClientStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// The locally cached value. Never touches the network.
    pub fn dark_mode(&self) -> bool {
        match self.storage.dark_mode() {
            Ok(dark_mode) => dark_mode.unwrap_or(false),
            Err(e) => {
                warn!("Could not read cached dark mode: {}", e);
                false
            }
        }
    }

    /// Asks the server and caches the answer. Falls back to the cached value
    /// when the server cannot be reached.
    pub async fn fetch_dark_mode(&self) -> Result<bool, PreferencesError> {
        match self.repository.get_dark_mode().await {
            Ok(dark_mode) => {
                self.storage.set_dark_mode(dark_mode)?;
                Ok(dark_mode)
            }
            Err(e) if e.is_unauthorized() => Err(PreferencesError::Unauthorized),
            Err(e) => {
                warn!("Failed to fetch dark mode, using cached value: {}", e);
                Ok(self.dark_mode())
            }
        }
    }

    /// Flips the preference locally, then on the server. The local value is
    /// reverted if the server refuses.
    pub async fn toggle_dark_mode(&self) -> Result<bool, PreferencesError> {
        let previous = self.dark_mode();
        let next = !previous;
        self.storage.set_dark_mode(next)?;

        if let Err(e) = self.repository.set_dark_mode(next).await {
            warn!("Failed to save dark mode, reverting: {}", e);
            self.storage.set_dark_mode(previous)?;
            return Err(e.into());
        }

        info!(dark_mode = next, "Dark mode updated");
        Ok(next)
    }
}
