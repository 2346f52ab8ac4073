//! Bearer token persistence
//!
//! The token is the only durable session state. It lives under the fixed key
//! [`TOKEN_KEY`] in a small YAML credentials file.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use log::{debug, warn};

use super::{jwt, lock};
use crate::config::restrict_permissions;
use crate::error::{ConfigError, Result};

/// Storage key the bearer token is saved under
pub const TOKEN_KEY: &str = "token";

/// Holder of at most one bearer credential
pub trait TokenStore: Send + Sync {
    /// Persist `token`, replacing any previous one
    fn save(&self, token: &str) -> Result<()>;

    /// Current token, if any
    fn read(&self) -> Option<String>;

    /// Remove the token
    fn clear(&self) -> Result<()>;

    /// Advisory check: a token is present and its `exp` claim (if any) is in
    /// the future
    fn is_valid(&self) -> bool {
        self.read().is_some_and(|token| jwt::is_valid(&token))
    }
}

/// In-process token store
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<()> {
        *lock(&self.token) = Some(token.to_string());
        Ok(())
    }

    fn read(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    fn clear(&self) -> Result<()> {
        *lock(&self.token) = None;
        Ok(())
    }
}

/// Token store backed by a credentials file.
///
/// The file is a YAML map; only the [`TOKEN_KEY`] entry is ever touched.
/// A missing or unreadable file reads as "no token".
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the credentials file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let entries = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(entries)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents =
            serde_yaml::to_string(entries).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(&self.path, contents)?;
        restrict_permissions(&self.path)
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) -> Result<()> {
        let _guard = lock(&self.write_lock);
        let mut entries = self.load_entries().unwrap_or_default();
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries)?;
        debug!("Saved token to {}", self.path.display());
        Ok(())
    }

    fn read(&self) -> Option<String> {
        match self.load_entries() {
            Ok(mut entries) => entries.remove(TOKEN_KEY).filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(
                    "Ignoring unreadable credentials file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn clear(&self) -> Result<()> {
        let _guard = lock(&self.write_lock);
        let mut entries = self.load_entries().unwrap_or_default();
        if entries.remove(TOKEN_KEY).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_entries(&entries)?;
        debug!("Cleared token from {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::tests::token_expiring_at;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.read(), None);

        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.read().as_deref(), Some("second"));

        store.clear().unwrap();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_is_valid_requires_a_token() {
        let store = MemoryTokenStore::new();
        assert!(!store.is_valid());
    }

    #[test]
    fn test_is_valid_follows_expiry() {
        let now = chrono::Utc::now().timestamp();

        let store = MemoryTokenStore::with_token(token_expiring_at(now + 600));
        assert!(store.is_valid());

        store.save(&token_expiring_at(now - 600)).unwrap();
        assert!(!store.is_valid());

        store.save("x.y.z").unwrap();
        assert!(!store.is_valid());
    }

    #[test]
    fn test_file_store_persists_under_fixed_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.yaml");
        let store = FileTokenStore::new(&path);

        store.save("x.y.z").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("token: x.y.z"));

        // A fresh handle on the same file sees the token
        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.read().as_deref(), Some("x.y.z"));
    }

    #[test]
    fn test_file_store_clear_removes_token() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("credentials.yaml"));

        store.save("abc.def.ghi").unwrap();
        store.clear().unwrap();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_file_store_clear_without_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.yaml");
        let store = FileTokenStore::new(&path);

        store.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_treats_garbage_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.yaml");
        std::fs::write(&path, "[not: a map").unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.read(), None);

        // Saving recovers the file
        store.save("new.token.value").unwrap();
        assert_eq!(store.read().as_deref(), Some("new.token.value"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.yaml");
        FileTokenStore::new(&path).save("t.o.k").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
