//! Persisted session record
//!
//! The logged-in user's record lives in one JSON file. It is written on
//! login, read at start-up and removed on logout. The record is trusted as
//! stored; nothing here checks it against the backend.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{SessionContext, SessionUser};

/// File-backed session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured location
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(config.session_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the login response exactly as received.
    ///
    /// The record must at least describe a user; otherwise nothing is written.
    pub fn save_record(&self, record: &Value) -> Result<SessionUser> {
        let user: SessionUser = serde_json::from_value(record.clone())?;
        self.write(&serde_json::to_string_pretty(record)?)?;
        tracing::info!(user_id = user.user_id, "Session saved");
        Ok(user)
    }

    /// Persist a typed record
    pub fn save(&self, user: &SessionUser) -> Result<()> {
        self.write(&serde_json::to_string_pretty(user)?)?;
        tracing::debug!(user_id = user.user_id, "Session updated");
        Ok(())
    }

    fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Read the stored record, if any
    pub fn load(&self) -> Result<Option<SessionUser>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// The current user; an unreadable record counts as logged out
    pub fn current_user(&self) -> Option<SessionUser> {
        match self.load() {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session record");
                None
            }
        }
    }

    /// Session context for the screens of this run
    pub fn context(&self) -> SessionContext {
        self.current_user().into()
    }

    /// True only when a readable record is stored
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Forget the session. Removing an absent record is fine.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Merge updated profile fields into the stored record
    pub fn update_current_user(&self, fields: &Value) -> Result<SessionUser> {
        let current = self
            .load()?
            .ok_or_else(|| Error::InvalidOperation("No active session".to_string()))?;
        let updated = current.merged_with(fields)?;
        self.save(&updated)?;
        Ok(updated)
    }
}
