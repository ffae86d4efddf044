use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use blockseat_core::{AuthToken, TokenSource};
use blockseat_shared::Masked;
use tracing::warn;

use crate::StoreError;

const TOKEN_KEY: &str = "authToken";

/// Local key-value file (`{"authToken": "..."}`) used when a request carries
/// no token. Read-only; the file is re-read on each lookup.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Option<AuthToken>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let entries: HashMap<String, serde_json::Value> = serde_json::from_str(&raw)?;
        Ok(entries
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| Masked::new(t.to_string())))
    }
}

impl TokenSource for FileTokenStore {
    fn token(&self) -> Option<AuthToken> {
        match self.read() {
            Ok(token) => token,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read token store");
                None
            }
        }
    }
}
