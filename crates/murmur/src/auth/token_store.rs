//! Durable storage for the session credential pair.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::auth::AuthTokens;
use crate::error::StoreError;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// The two credential slots a token store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    /// The short-lived access token.
    Access,
    /// The long-lived refresh token.
    Refresh,
}

impl TokenKey {
    /// Returns the storage key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKey::Access => "access_token",
            TokenKey::Refresh => "refresh_token",
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage for the session credential pair.
///
/// Implementations must tolerate concurrent calls, and a read must never
/// observe a torn value. Absence of a token is `Ok(None)`, not an error;
/// removing an absent key is a no-op.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the stored value for a key, if any.
    async fn read(&self, key: TokenKey) -> Result<Option<String>, StoreError>;

    /// Store a value for a key, replacing any previous value.
    async fn write(&self, key: TokenKey, value: &str) -> Result<(), StoreError>;

    /// Remove the value for a key.
    async fn remove(&self, key: TokenKey) -> Result<(), StoreError>;

    /// Store a freshly minted token pair, access token first.
    async fn write_pair(&self, tokens: &AuthTokens) -> Result<(), StoreError> {
        self.write(TokenKey::Access, &tokens.access_token).await?;
        self.write(TokenKey::Refresh, &tokens.refresh_token).await
    }

    /// Remove both tokens.
    async fn clear(&self) -> Result<(), StoreError> {
        self.remove(TokenKey::Access).await?;
        self.remove(TokenKey::Refresh).await
    }
}

/// In-memory token store for tests and short-lived tools.
#[derive(Default)]
pub struct MemoryTokenStore {
    values: RwLock<HashMap<TokenKey, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a token pair.
    pub fn with_pair(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(TokenKey::Access, access.into());
        values.insert(TokenKey::Refresh, refresh.into());
        Self {
            values: RwLock::new(values),
        }
    }
}

// Hide token values in Debug output
impl fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTokenStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn read(&self, key: TokenKey) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn write(&self, key: TokenKey, value: &str) -> Result<(), StoreError> {
        self.values.write().await.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: TokenKey) -> Result<(), StoreError> {
        self.values.write().await.remove(&key);
        Ok(())
    }
}

/// Serialized shape of the token file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

impl StoredTokens {
    fn slot(&mut self, key: TokenKey) -> &mut Option<String> {
        match key {
            TokenKey::Access => &mut self.access_token,
            TokenKey::Refresh => &mut self.refresh_token,
        }
    }

    fn get(&self, key: TokenKey) -> Option<&String> {
        match key {
            TokenKey::Access => self.access_token.as_ref(),
            TokenKey::Refresh => self.refresh_token.as_ref(),
        }
    }
}

/// File-backed token store.
///
/// Tokens are kept as a small JSON object. Updates go through a temp file
/// and a rename, so a concurrent read never observes a torn file. On Unix
/// the file is written with mode 0600.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    update: Mutex<()>,
}

impl FileTokenStore {
    /// Create a store backed by the given file path.
    ///
    /// The file and its parent directory are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            update: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<StoredTokens, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => serde_json::from_str(&json).map_err(|e| StoreError::Malformed {
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoredTokens::default()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn save(&self, tokens: &StoredTokens) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(tokens).map_err(|e| StoreError::Malformed {
            message: e.to_string(),
        })?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &json).await?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&tmp, perms).await?;
        }

        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "token file updated");
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn read(&self, key: TokenKey) -> Result<Option<String>, StoreError> {
        Ok(self.load().await?.get(key).cloned())
    }

    async fn write(&self, key: TokenKey, value: &str) -> Result<(), StoreError> {
        let _guard = self.update.lock().await;
        let mut tokens = self.load().await?;
        *tokens.slot(key) = Some(value.to_string());
        self.save(&tokens).await
    }

    async fn remove(&self, key: TokenKey) -> Result<(), StoreError> {
        let _guard = self.update.lock().await;
        let mut tokens = self.load().await?;
        *tokens.slot(key) = None;
        self.save(&tokens).await
    }
}
