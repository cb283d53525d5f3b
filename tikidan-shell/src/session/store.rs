//! Persisted session storage
//!
//! Exactly two entries live in the store: the opaque bearer token and the
//! JSON-serialized user profile. Anything missing, unparseable or corrupt
//! loads as the anonymous session; persistence problems never reach the UI
//! layer as errors.

use super::Session;
use crate::permissions::PermissionSet;
use shared::client::UserProfile;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at `dir` (created on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Persist a new session, overwriting any prior one
    pub fn save_session(&self, token: &str, user: &UserProfile) -> Result<(), SessionStoreError> {
        self.ensure_dir()?;
        fs::write(self.token_path(), token)?;
        let json = serde_json::to_string_pretty(user)?;
        fs::write(self.user_path(), json)?;
        tracing::debug!(user = %user.id, "session persisted");
        Ok(())
    }

    /// Load the persisted session
    ///
    /// A partial session (one entry missing) counts as no session, per the
    /// token-and-user-together invariant. Corrupt JSON is logged and
    /// likewise treated as anonymous.
    pub fn load_session(&self) -> Session {
        let token = match read_entry(&self.token_path()) {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => return Session::Anonymous,
        };

        let raw_user = match read_entry(&self.user_path()) {
            Some(raw) => raw,
            None => return Session::Anonymous,
        };

        match serde_json::from_str::<UserProfile>(&raw_user) {
            Ok(user) => Session::Authenticated { token, user },
            Err(err) => {
                tracing::warn!(%err, "corrupt persisted user profile, treating as logged out");
                Session::Anonymous
            }
        }
    }

    /// Remove both entries
    pub fn clear_session(&self) -> Result<(), SessionStoreError> {
        remove_entry(&self.token_path())?;
        remove_entry(&self.user_path())?;
        tracing::debug!("session cleared");
        Ok(())
    }

    /// Merge a resolved permission set into the stored user profile
    ///
    /// Later loads then carry a cached set and skip remote resolution. A
    /// no-op when no session is stored.
    pub fn update_user_permissions(
        &self,
        permissions: &PermissionSet,
    ) -> Result<(), SessionStoreError> {
        let Session::Authenticated { token, mut user } = self.load_session() else {
            tracing::warn!("no stored session to attach permissions to");
            return Ok(());
        };

        user.permissions = Some(permissions.to_tags());
        self.save_session(&token, &user)
    }
}

fn read_entry(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    fs::read_to_string(path).ok()
}

fn remove_entry(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "Ada Park".to_string(),
            email: "ada@tikidan.com".to_string(),
            role: "hr_manager".to_string(),
            department: "People".to_string(),
            permissions: None,
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());

        store.save_session("tok-1", &profile()).unwrap();
        match store.load_session() {
            Session::Authenticated { token, user } => {
                assert_eq!(token, "tok-1");
                assert_eq!(user.email, "ada@tikidan.com");
            }
            Session::Anonymous => panic!("expected a session"),
        }
    }

    #[test]
    fn missing_entries_load_as_anonymous() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(matches!(store.load_session(), Session::Anonymous));
    }

    #[test]
    fn partial_session_counts_as_no_session() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());

        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join(TOKEN_FILE), "tok-1").unwrap();

        assert!(matches!(store.load_session(), Session::Anonymous));
    }

    #[test]
    fn corrupt_user_json_loads_as_anonymous() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());

        store.save_session("tok-1", &profile()).unwrap();
        fs::write(dir.path().join(USER_FILE), "{not valid json").unwrap();

        assert!(matches!(store.load_session(), Session::Anonymous));
    }

    #[test]
    fn clear_removes_both_entries() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());

        store.save_session("tok-1", &profile()).unwrap();
        store.clear_session().unwrap();

        assert!(!dir.path().join(TOKEN_FILE).exists());
        assert!(!dir.path().join(USER_FILE).exists());
        assert!(matches!(store.load_session(), Session::Anonymous));
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        store.clear_session().unwrap();
        store.clear_session().unwrap();
    }

    #[test]
    fn permission_update_round_trips() {
        use crate::permissions::Permission;

        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());

        store.save_session("tok-1", &profile()).unwrap();
        let resolved = PermissionSet::from_tags(&["dashboard", "team"]);
        store.update_user_permissions(&resolved).unwrap();

        match store.load_session() {
            Session::Authenticated { user, .. } => {
                let stored = user.permissions.expect("permissions cached");
                let set = PermissionSet::from_tags(&stored);
                assert!(set.allows(Permission::Dashboard));
                assert!(set.allows(Permission::Team));
            }
            Session::Anonymous => panic!("expected a session"),
        }
    }

    #[test]
    fn permission_update_without_session_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        store
            .update_user_permissions(&PermissionSet::from_tags(&["team"]))
            .unwrap();
        assert!(matches!(store.load_session(), Session::Anonymous));
    }
}
