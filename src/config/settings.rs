//! Application settings loaded from an optional TOML file.
//!
//! Lookup order for the file: the path in `BUDGET_TRACKER_CONFIG`, then
//! `./config.toml` if it exists. Without a file every setting takes its
//! default. `DATABASE_URL` in the environment (or `.env`) overrides the
//! database URL from the file.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::core::ledger::BudgetDeleteScope;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit settings file
pub const CONFIG_PATH_ENV: &str = "BUDGET_TRACKER_CONFIG";

/// Environment variable overriding the database URL
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Runtime settings for the CLI
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `SeaORM` connection URL
    pub database_url: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Whether deleting a budget by id is restricted to the session user
    pub budget_delete_scope: BudgetDeleteScope,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_filter: "warn".to_string(),
            budget_delete_scope: BudgetDeleteScope::default(),
        }
    }
}

/// Parses settings from a TOML file.
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or is not valid TOML
/// for [`AppConfig`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {}: {e}", path_ref.display()),
    })
}

/// Resolves the settings the binary runs with.
///
/// An explicitly named file must exist; the default `config.toml` is optional.
pub fn load_app_configuration() -> Result<AppConfig> {
    let mut config = match config_path() {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
        debug!("Using database URL from {DATABASE_URL_ENV}");
        config.database_url = url;
    }

    Ok(config)
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.exists().then_some(default)
}
