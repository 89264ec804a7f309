use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Table holding the service account in a TOML secrets file.
pub const SECRETS_TABLE: &str = "gcp_service_account";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CredentialsError {
    #[error("cannot read credentials file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid service account JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid secrets TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("secrets file has no [gcp_service_account] table")]
    MissingTable,
}

/// Google service account key, loaded once at startup and shared read-only.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parse a service account key in Google's JSON key format.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::Json` if the document is malformed.
    pub fn from_json_str(raw: &str) -> Result<Self, CredentialsError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parse the `[gcp_service_account]` table of a TOML secrets file.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::MissingTable` if the table is absent and
    /// `CredentialsError::Toml` if the file or table is malformed.
    pub fn from_secrets_toml(raw: &str) -> Result<Self, CredentialsError> {
        let mut table: toml::Table = toml::from_str(raw)?;
        let account = table
            .remove(SECRETS_TABLE)
            .ok_or(CredentialsError::MissingTable)?;
        Ok(account.try_into()?)
    }

    /// Load from a `.toml` secrets file or a JSON key file.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CredentialsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CredentialsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_secrets_toml(&raw)
        } else {
            Self::from_json_str(&raw)
        }
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("project_id", &self.project_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}
