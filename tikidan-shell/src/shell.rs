//! The navigation shell
//!
//! Composes the session manager, the permission resolver and the nav tables
//! into the frame the views talk to. One permission set drives both the
//! drawer and the route guard; every mutation of it goes through here.

use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::nav::guard::{authorize, RouteDecision, DEFAULT_ROUTE, LOGIN_ROUTE};
use crate::nav::menu::{generate_menus, MenuSection};
use crate::permissions::{PermissionResolver, PermissionSet, StoredPermissions};
use crate::session::{Session, SessionManager, SessionStore};
use std::sync::Arc;
use tikidan_client::{ClientConfig, ClientError, HttpClient};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

/// Application frame: session, permissions and navigation in one place
pub struct Shell {
    config: ShellConfig,
    sessions: Arc<SessionManager>,
    client: RwLock<HttpClient>,
    permissions: RwLock<PermissionSet>,
    current_route: RwLock<String>,
    refresh_cancel: Mutex<CancellationToken>,
}

impl Shell {
    /// Create a shell, restoring any persisted session
    ///
    /// A cached permission set from the stored profile is applied
    /// immediately so the drawer renders without waiting for the network;
    /// [`restore`](Self::restore) refreshes it afterwards.
    pub fn new(config: ShellConfig) -> Self {
        let sessions = Arc::new(SessionManager::new(SessionStore::new(&config.data_dir)));
        let session = sessions.current();

        let mut client_config =
            ClientConfig::new(config.api_base_url.as_str()).with_timeout(config.request_timeout);
        if let Some(token) = session.token() {
            client_config = client_config.with_token(token);
        }

        let permissions = match session.user().map(StoredPermissions::from_profile) {
            Some(StoredPermissions::Cached(set)) => set,
            _ => PermissionSet::empty(),
        };

        let current_route = if session.is_authenticated() {
            DEFAULT_ROUTE
        } else {
            LOGIN_ROUTE
        };

        Self {
            client: RwLock::new(client_config.build_http_client()),
            sessions,
            permissions: RwLock::new(permissions),
            current_route: RwLock::new(current_route.to_string()),
            refresh_cancel: Mutex::new(CancellationToken::new()),
            config,
        }
    }

    fn anonymous_client(&self) -> HttpClient {
        ClientConfig::new(self.config.api_base_url.as_str())
            .with_timeout(self.config.request_timeout)
            .build_http_client()
    }

    /// The session context (read/subscribe)
    pub fn sessions(&self) -> Arc<SessionManager> {
        Arc::clone(&self.sessions)
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Session {
        self.sessions.current()
    }

    /// Snapshot of the current permission set
    pub async fn permissions(&self) -> PermissionSet {
        self.permissions.read().await.clone()
    }

    /// The route the frame is currently showing
    pub async fn current_route(&self) -> String {
        self.current_route.read().await.clone()
    }

    pub(crate) async fn api_client(&self) -> HttpClient {
        self.client.read().await.clone()
    }

    // ========== Auth flow ==========

    /// Authenticate and install a new session
    ///
    /// On a rejected login the backend message is returned for inline
    /// display and nothing changes. On success the session is persisted,
    /// permissions are resolved and cached, and the frame lands on the
    /// default route.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ShellError> {
        let response = self.anonymous_client().login(email, password).await?;

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "Login failed".to_string());
            tracing::debug!(%email, "login rejected");
            return Err(ShellError::LoginRejected(message));
        }

        let (token, user) = match (response.token, response.user) {
            (Some(token), Some(user)) => (token, user),
            _ => {
                return Err(ShellError::Client(ClientError::InvalidResponse(
                    "login response missing token or user".to_string(),
                )))
            }
        };

        tracing::info!(user = %user.id, role = %user.role, "login successful");
        self.sessions.login(token.clone(), user)?;

        *self.client.write().await = ClientConfig::new(self.config.api_base_url.as_str())
            .with_timeout(self.config.request_timeout)
            .with_token(token)
            .build_http_client();
        *self.permissions.write().await = PermissionSet::empty();

        self.refresh_permissions().await;
        *self.current_route.write().await = DEFAULT_ROUTE.to_string();
        Ok(())
    }

    /// Tear the session down and land on the login view
    ///
    /// Also cancels any in-flight permission lookup so it cannot write into
    /// a later session. Persistence problems degrade to a warning; logout
    /// never fails toward the UI.
    pub async fn logout(&self) {
        self.refresh_cancel.lock().await.cancel();

        if let Err(err) = self.sessions.logout() {
            tracing::warn!(%err, "failed to clear persisted session");
        }
        *self.permissions.write().await = PermissionSet::empty();
        *self.client.write().await = self.anonymous_client();
        *self.current_route.write().await = LOGIN_ROUTE.to_string();
        tracing::info!("logged out");
    }

    /// Re-enter a persisted session on startup
    ///
    /// Returns whether a session was restored. Permissions are refreshed
    /// (instantly, when the stored profile carries a cached set).
    pub async fn restore(&self) -> bool {
        if !self.session().is_authenticated() {
            return false;
        }
        self.refresh_permissions().await;
        true
    }

    /// The backend answered 401: the token is dead, force a logout
    pub async fn handle_unauthorized(&self) -> RouteDecision {
        tracing::warn!("backend rejected session token, forcing logout");
        self.logout().await;
        RouteDecision::RedirectToLogin
    }

    // ========== Permissions ==========

    /// Resolve the session's permission set and publish it
    ///
    /// Failure resolves to the empty set (fail closed) and is logged, never
    /// surfaced as a crash. The result is discarded when the session epoch
    /// moved while the lookup was in flight, and the lookup itself is
    /// cancelled by logout.
    pub async fn refresh_permissions(&self) {
        let Session::Authenticated { user, .. } = self.sessions.current() else {
            return;
        };
        let epoch = self.sessions.epoch();

        let cancel = {
            let mut guard = self.refresh_cancel.lock().await;
            guard.cancel();
            *guard = CancellationToken::new();
            guard.clone()
        };

        let resolver = PermissionResolver::new(self.api_client().await);
        let resolved = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("permission refresh cancelled");
                return;
            }
            result = resolver.resolve(&user) => result,
        };

        match resolved {
            Ok(set) => {
                let applied = match self.sessions.cache_permissions(epoch, &set) {
                    Ok(applied) => applied,
                    Err(err) => {
                        tracing::warn!(%err, "failed to persist resolved permissions");
                        self.sessions.epoch() == epoch
                    }
                };
                if applied {
                    *self.permissions.write().await = set;
                }
            }
            Err(err) => {
                if err.is_unauthorized() {
                    self.handle_unauthorized().await;
                    return;
                }
                tracing::warn!(error = %err, "permission lookup failed, failing closed");
                if self.sessions.epoch() == epoch {
                    *self.permissions.write().await = PermissionSet::empty();
                }
            }
        }
    }

    // ========== Navigation ==========

    /// Decide a navigation attempt and move the frame accordingly
    ///
    /// Landing on the login view tears down any session that still exists;
    /// entering it is an explicit way out of a logged-in state.
    pub async fn navigate(&self, path: &str) -> RouteDecision {
        let authenticated = self.session().is_authenticated();
        let permissions = self.permissions.read().await.clone();
        let decision = authorize(authenticated, &permissions, path);

        let target = match decision {
            RouteDecision::Allow => path,
            RouteDecision::RedirectToLogin => LOGIN_ROUTE,
            RouteDecision::RedirectToDefault => DEFAULT_ROUTE,
        };
        if target == LOGIN_ROUTE && authenticated {
            self.logout().await;
        } else {
            *self.current_route.write().await = target.to_string();
        }

        tracing::debug!(%path, ?decision, "navigation decided");
        decision
    }

    /// The drawer sections visible to the current session
    pub async fn menus(&self) -> Vec<MenuSection> {
        generate_menus(&*self.permissions.read().await)
    }
}
