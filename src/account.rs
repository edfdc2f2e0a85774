// File: ./src/account.rs
//! The account file: `{ "email": ..., "password": ... }` as JSON.
use crate::client::Credentials;
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk shape. Both fields are optional so a file holding only the email
/// still loads; the password is then prompted for.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl AccountFile {
    pub fn default_path(ctx: &dyn AppContext) -> Result<PathBuf> {
        ctx.get_account_file_path()
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            log::debug!("No account file at {}", path.display());
            return Ok(None);
        }
        let account: AccountFile = LocalStorage::read_json(path)
            .with_context(|| format!("Invalid account file '{}'", path.display()))?;
        Ok(Some(account))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        LocalStorage::write_json(path, self)?;
        log::info!("Saved account to {}", path.display());
        Ok(())
    }

    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some(Credentials::new(email, password)),
            _ => None,
        }
    }
}

impl From<&Credentials> for AccountFile {
    fn from(c: &Credentials) -> Self {
        Self {
            email: Some(c.email.clone()),
            password: Some(c.password.clone()),
        }
    }
}
