//! Permission resolution
//!
//! Turns a user profile into its canonical [`PermissionSet`], hitting the
//! backend only when the profile carries no usable cached set. Resolution
//! errors are surfaced to the caller; the shell converts them to the empty
//! set (fail closed) and logs.

use super::{PermissionSet, Role, StoredPermissions};
use async_trait::async_trait;
use shared::client::{RolePermissionsResponse, UserPermissionsResponse, UserProfile};
use tikidan_client::{ClientResult, HttpClient};

/// Backend seam for permission lookups
///
/// Implemented by [`HttpClient`]; tests substitute a fake to observe or fail
/// the remote calls.
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Permissions of the currently authenticated user (token-keyed)
    async fn user_permissions(&self) -> ClientResult<UserPermissionsResponse>;

    /// Default permissions for a role (used when seeding new employees)
    async fn role_permissions(&self, role: &str) -> ClientResult<RolePermissionsResponse>;
}

#[async_trait]
impl PermissionSource for HttpClient {
    async fn user_permissions(&self) -> ClientResult<UserPermissionsResponse> {
        HttpClient::user_permissions(self).await
    }

    async fn role_permissions(&self, role: &str) -> ClientResult<RolePermissionsResponse> {
        HttpClient::role_permissions(self, role).await
    }
}

/// Resolves permission sets from the cache or the backend
#[derive(Debug, Clone)]
pub struct PermissionResolver<S> {
    source: S,
}

impl<S: PermissionSource> PermissionResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Canonical permission set for `user`
    ///
    /// A non-empty cached set is returned as-is without any network call;
    /// repeated calls on an unchanged profile stay local. Only an
    /// unresolved profile goes remote.
    pub async fn resolve(&self, user: &UserProfile) -> ClientResult<PermissionSet> {
        match StoredPermissions::from_profile(user) {
            StoredPermissions::Cached(set) => {
                tracing::debug!(user = %user.id, count = set.len(), "permission cache hit");
                Ok(set)
            }
            StoredPermissions::Unresolved => {
                let response = self.source.user_permissions().await?;
                tracing::debug!(
                    user = %user.id,
                    role = %response.role,
                    count = response.permissions.len(),
                    "permissions resolved remotely"
                );
                Ok(PermissionSet::from_tags(&response.permissions))
            }
        }
    }

    /// Default permission set for a role
    ///
    /// Seeds a new employee record's starting permissions from its assigned
    /// role. Same fail-closed contract as [`resolve`](Self::resolve): the
    /// caller maps errors to the empty set.
    pub async fn resolve_role_defaults(&self, role: &Role) -> ClientResult<PermissionSet> {
        let response = self.source.role_permissions(role.as_str()).await?;
        Ok(PermissionSet::from_tags(&response.permissions))
    }
}
