//! Infrastructure implementation of the `TokenStore` port.
//!
//! Each project keeps its bundle in `<project folder>/token-db.json`.

use chrono::{DateTime, Utc};
use sctl_common::{Token, TokenBundle};
use serde::{Deserialize, Serialize};

use crate::application::ports::TokenStore;
use crate::domain::{Project, RegistryError};
use crate::infra::fs::write_atomic;

/// File name of the per-project token record.
pub const TOKEN_FILE: &str = "token-db.json";

/// Flat on-disk record: auth token data, master token, auth timestamp.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenRecord {
    auth: String,
    master: String,
    auth_timestamp: DateTime<Utc>,
}

impl From<&TokenBundle> for TokenRecord {
    fn from(bundle: &TokenBundle) -> Self {
        Self {
            auth: bundle.auth.data.clone(),
            master: bundle.master.clone(),
            auth_timestamp: bundle.auth.timestamp,
        }
    }
}

impl From<TokenRecord> for TokenBundle {
    fn from(record: TokenRecord) -> Self {
        Token {
            data: record.auth,
            timestamp: record.auth_timestamp,
        }
        .to_bundle(record.master)
    }
}

/// Token store backed by one JSON file per project folder.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTokenStore;

impl FileTokenStore {
    fn path(project: &Project) -> std::path::PathBuf {
        project.folder.join(TOKEN_FILE)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, project: &Project) -> Result<TokenBundle, RegistryError> {
        let path = Self::path(project);
        let lookup_failed = |reason: String| RegistryError::LookupFailed {
            what: format!("token bundle {}", path.display()),
            reason,
        };
        let content = std::fs::read_to_string(&path).map_err(|e| lookup_failed(e.to_string()))?;
        let record: TokenRecord =
            serde_json::from_str(&content).map_err(|e| lookup_failed(e.to_string()))?;
        Ok(record.into())
    }

    fn save(&self, project: &Project, bundle: &TokenBundle) -> Result<(), RegistryError> {
        let path = Self::path(project);
        let write_failed = |reason: String| RegistryError::WriteFailed {
            what: format!("token bundle {}", path.display()),
            reason,
        };
        let content = serde_json::to_string_pretty(&TokenRecord::from(bundle))
            .map_err(|e| write_failed(e.to_string()))?;
        write_atomic(&path, &content).map_err(|e| write_failed(format!("{e:#}")))?;
        tracing::debug!(project = %project.name, path = %path.display(), "token bundle saved");
        Ok(())
    }
}
