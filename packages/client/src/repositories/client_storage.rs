use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::repositories::errors::storage_errors::StorageError;

/// Values that survive a restart of the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

pub trait ClientStorage: Send + Sync {
    fn load(&self) -> Result<StoredPreferences, StorageError>;
    fn store(&self, preferences: &StoredPreferences) -> Result<(), StorageError>;

    /// Read-modify-write of the stored preferences. Implementations shared
    /// between threads override this to hold their lock across both steps.
    fn update(&self, change: &mut dyn FnMut(&mut StoredPreferences)) -> Result<(), StorageError> {
        let mut preferences = self.load()?;
        change(&mut preferences);
        self.store(&preferences)
    }

    fn player_name(&self) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.player_name)
    }

    fn set_player_name(&self, player_name: Option<&str>) -> Result<(), StorageError> {
        self.update(&mut |preferences: &mut StoredPreferences| {
            preferences.player_name = player_name.map(str::to_string);
        })
    }

    fn auth_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.token)
    }

    fn set_auth_token(&self, token: Option<&str>) -> Result<(), StorageError> {
        self.update(&mut |preferences: &mut StoredPreferences| {
            preferences.token = token.map(str::to_string);
        })
    }

    fn dark_mode(&self) -> Result<Option<bool>, StorageError> {
        Ok(self.load()?.dark_mode)
    }

    fn set_dark_mode(&self, dark_mode: bool) -> Result<(), StorageError> {
        self.update(&mut |preferences: &mut StoredPreferences| {
            preferences.dark_mode = Some(dark_mode);
        })
    }
}

/// JSON file on disk, re-read on every access. A missing file reads as empty.
pub struct FileClientStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileClientStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileClientStorage {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, preferences: &StoredPreferences) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(preferences)?;
        std::fs::write(&self.path, contents)?;
        debug!("Stored client preferences at {}", self.path.display());
        Ok(())
    }
}

impl ClientStorage for FileClientStorage {
    fn load(&self) -> Result<StoredPreferences, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(StoredPreferences::default()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(StoredPreferences::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, preferences: &StoredPreferences) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        self.write_file(preferences)
    }

    fn update(&self, change: &mut dyn FnMut(&mut StoredPreferences)) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut preferences = self.load()?;
        change(&mut preferences);
        self.write_file(&preferences)
    }
}

#[derive(Default)]
pub struct InMemoryClientStorage {
    preferences: RwLock<StoredPreferences>,
}

impl InMemoryClientStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player_name(player_name: &str) -> Self {
        InMemoryClientStorage {
            preferences: RwLock::new(StoredPreferences {
                player_name: Some(player_name.to_string()),
                ..StoredPreferences::default()
            }),
        }
    }
}

impl ClientStorage for InMemoryClientStorage {
    fn load(&self) -> Result<StoredPreferences, StorageError> {
        Ok(self.preferences.read().clone())
    }

    fn store(&self, preferences: &StoredPreferences) -> Result<(), StorageError> {
        *self.preferences.write() = preferences.clone();
        Ok(())
    }

    fn update(&self, change: &mut dyn FnMut(&mut StoredPreferences)) -> Result<(), StorageError> {
        change(&mut self.preferences.write());
        Ok(())
    }
}
