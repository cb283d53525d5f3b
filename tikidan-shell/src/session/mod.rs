//! Login session state
//!
//! [`Session`] is the authenticated identity plus bearer token; the
//! token-and-user-together invariant is structural (there is no partial
//! variant). [`SessionManager`] is the explicitly passed session context:
//! it owns the persisted store, publishes changes over a watch channel, and
//! tracks a login epoch so stale async results can be recognized.

pub mod store;

pub use store::{SessionStore, SessionStoreError};

use crate::permissions::PermissionSet;
use shared::client::UserProfile;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// The current login state
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Anonymous,
    Authenticated { token: String, user: UserProfile },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }
}

/// Owns the session for the lifetime of the application
///
/// All writes go through here so the persisted store, the in-memory state
/// and the subscribers can never disagree. Every login and logout bumps the
/// epoch; an async permission lookup records the epoch it started under and
/// its result is discarded if the epoch has moved by the time it lands.
#[derive(Debug)]
pub struct SessionManager {
    store: SessionStore,
    epoch: AtomicU64,
    tx: watch::Sender<Session>,
}

impl SessionManager {
    /// Create a manager over `store`, restoring any persisted session
    pub fn new(store: SessionStore) -> Self {
        let restored = store.load_session();
        if restored.is_authenticated() {
            tracing::debug!("restored persisted session");
        }
        let (tx, _) = watch::channel(restored);
        Self {
            store,
            epoch: AtomicU64::new(0),
            tx,
        }
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// The current login epoch
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Install a new session (successful login), replacing any prior one
    pub fn login(&self, token: String, user: UserProfile) -> Result<(), SessionStoreError> {
        self.store.save_session(&token, &user)?;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.tx.send_replace(Session::Authenticated { token, user });
        Ok(())
    }

    /// Tear the session down (logout or token invalidation)
    pub fn logout(&self) -> Result<(), SessionStoreError> {
        self.store.clear_session()?;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.tx.send_replace(Session::Anonymous);
        Ok(())
    }

    /// Attach a resolved permission set to the session started at `epoch`
    ///
    /// Returns false (and changes nothing) when the epoch has moved, i.e.
    /// the lookup outlived the session it was issued for.
    pub fn cache_permissions(
        &self,
        epoch: u64,
        permissions: &PermissionSet,
    ) -> Result<bool, SessionStoreError> {
        if epoch != self.epoch() {
            tracing::warn!(
                started_at = epoch,
                current = self.epoch(),
                "discarding stale permission lookup result"
            );
            return Ok(false);
        }

        self.store.update_user_permissions(permissions)?;
        self.tx.send_if_modified(|session| {
            if let Session::Authenticated { user, .. } = session {
                user.permissions = Some(permissions.to_tags());
                true
            } else {
                false
            }
        });
        Ok(true)
    }
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
    fn login_replaces_prior_session_and_bumps_epoch() {
        let dir = TempDir::new().unwrap();
        let sessions = SessionManager::new(SessionStore::new(dir.path()));
        assert_eq!(sessions.epoch(), 0);

        sessions.login("tok-1".to_string(), profile()).unwrap();
        assert_eq!(sessions.epoch(), 1);
        assert!(sessions.current().is_authenticated());

        let mut other = profile();
        other.id = "u2".to_string();
        sessions.login("tok-2".to_string(), other).unwrap();
        assert_eq!(sessions.epoch(), 2);
        assert_eq!(sessions.current().token(), Some("tok-2"));
    }

    #[test]
    fn subscribers_observe_logout() {
        let dir = TempDir::new().unwrap();
        let sessions = SessionManager::new(SessionStore::new(dir.path()));
        let rx = sessions.subscribe();

        sessions.login("tok-1".to_string(), profile()).unwrap();
        assert!(rx.borrow().is_authenticated());

        sessions.logout().unwrap();
        assert!(!rx.borrow().is_authenticated());
    }

    #[test]
    fn stale_permission_results_are_discarded() {
        let dir = TempDir::new().unwrap();
        let sessions = SessionManager::new(SessionStore::new(dir.path()));

        sessions.login("tok-1".to_string(), profile()).unwrap();
        let epoch = sessions.epoch();

        // Re-login as someone else before the lookup lands
        sessions.login("tok-2".to_string(), profile()).unwrap();

        let applied = sessions
            .cache_permissions(epoch, &PermissionSet::from_tags(&["*"]))
            .unwrap();
        assert!(!applied);
        let user = sessions.current().user().cloned().unwrap();
        assert!(user.permissions.is_none());
    }

    #[test]
    fn fresh_permission_results_are_applied() {
        let dir = TempDir::new().unwrap();
        let sessions = SessionManager::new(SessionStore::new(dir.path()));

        sessions.login("tok-1".to_string(), profile()).unwrap();
        let applied = sessions
            .cache_permissions(sessions.epoch(), &PermissionSet::from_tags(&["team"]))
            .unwrap();
        assert!(applied);

        let user = sessions.current().user().cloned().unwrap();
        assert_eq!(user.permissions, Some(vec!["team".to_string()]));

        // And the persisted copy agrees
        let reloaded = SessionStore::new(dir.path()).load_session();
        assert_eq!(
            reloaded.user().unwrap().permissions,
            Some(vec!["team".to_string()])
        );
    }
}
