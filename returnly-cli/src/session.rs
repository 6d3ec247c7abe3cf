//! Local session storage.
//!
//! The authentication lifecycle itself (login, token refresh) belongs to the
//! backend's auth service; returnly only reads the session it left behind at
//! ~/.config/returnly/session.toml.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use returnly_core::error::{ReturnlyError, ReturnlyResult};
use returnly_core::ports::{Session, SessionSource};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone)]
pub struct SessionData {
    pub user_id: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("returnly");

        Ok(config_dir.join("session.toml"))
    }

    pub fn new(path: PathBuf) -> Self {
        FileSession { path }
    }

    /// Load the stored session, if any. Expired sessions count as signed out.
    pub fn load(&self) -> Result<Option<SessionData>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let data: SessionData = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;

        if Utc::now() >= data.expires_at {
            return Ok(None);
        }

        Ok(Some(data))
    }
}

#[async_trait]
impl SessionSource for FileSession {
    async fn current_session(&self) -> ReturnlyResult<Option<Session>> {
        let data = self
            .load()
            .map_err(|e| ReturnlyError::Config(format!("{:#}", e)))?;

        Ok(data.map(|d| Session { user_id: d.user_id }))
    }
}
