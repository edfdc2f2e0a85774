// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::extract::DEFAULT_BASE_URL;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_days_forward() -> u32 {
    7
}
fn default_true() -> bool {
    true
}
fn default_max_concurrent_fetches() -> usize {
    4
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Account used when no `--account` is given and the account file has
    /// no email.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_days_forward")]
    pub days_forward: u32,
    /// Only look at courses of the most recent term.
    #[serde(default = "default_true")]
    pub recent_only: bool,
    #[serde(default)]
    pub unsubmitted_only: bool,
    /// 0 or 1 fetches course pages one at a time.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub allow_insecure_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        // Match the serde defaults
        Self {
            base_url: default_base_url(),
            email: None,
            days_forward: 7,
            recent_only: true,
            unsubmitted_only: false,
            max_concurrent_fetches: 4,
            user_agent: default_user_agent(),
            allow_insecure_certs: false,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults. Other failures
    /// (unreadable or invalid TOML) are still errors.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Whether an error from `load` means the config file does not exist.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Writes this config when no config file exists yet, so a first
    /// successful run leaves an editable file behind. Returns whether it wrote.
    pub fn save_if_missing(&self, ctx: &dyn AppContext) -> Result<bool> {
        if ctx.get_config_file_path()?.exists() {
            return Ok(false);
        }
        self.save(ctx)?;
        Ok(true)
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}
