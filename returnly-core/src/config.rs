//! Global returnly configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReturnlyError, ReturnlyResult};
use config::{Config, File};

static DEFAULT_PROVIDER: &str = "local";
static DEFAULT_TRANSACTIONS_PATH: &str = "~/.local/share/returnly/transactions.json";

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_transactions_path() -> PathBuf {
    PathBuf::from(DEFAULT_TRANSACTIONS_PATH)
}

/// Global configuration at ~/.config/returnly/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct ReturnlyConfig {
    /// Calendar provider binary suffix (`returnly-provider-{provider}`).
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Where the transaction ledger snapshot lives.
    #[serde(default = "default_transactions_path")]
    pub transactions_file: PathBuf,

    /// Base URL of the backend that owns the reminder table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,

    /// API key sent with every backend request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_api_key: Option<String>,
}

impl ReturnlyConfig {
    pub fn load() -> ReturnlyResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: ReturnlyConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| ReturnlyError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ReturnlyError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn config_path() -> ReturnlyResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ReturnlyError::Config("Could not determine config directory".into()))?
            .join("returnly");

        Ok(config_dir.join("config.toml"))
    }

    /// Backend connection details; both must be configured before any
    /// reminder record can be read or written.
    pub fn backend(&self) -> ReturnlyResult<(&str, &str)> {
        match (self.backend_url.as_deref(), self.backend_api_key.as_deref()) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => Err(ReturnlyError::Config(
                "backend_url and backend_api_key must be set in config.toml".into(),
            )),
        }
    }

    /// The transactions file path with `~` expanded.
    pub fn transactions_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.transactions_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with optional settings commented out.
    pub fn create_default_config(path: &Path) -> ReturnlyResult<()> {
        let contents = format!(
            "\
# returnly configuration

# Backend that owns the reminder table:
# backend_url = \"https://your-project.example.co\"
# backend_api_key = \"...\"

# Calendar provider (binary returnly-provider-<name> on PATH):
# provider = \"{}\"

# Where your transaction snapshot lives:
# transactions_file = \"{}\"
",
            DEFAULT_PROVIDER, DEFAULT_TRANSACTIONS_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ReturnlyError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ReturnlyError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
