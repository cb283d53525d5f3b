//! Client-related types shared between the HR backend and its clients
//!
//! Common request/response types used in API communication. The auth and
//! permission endpoints keep the wire shapes the backend fixed long ago
//! (`success` flag plus optional payload); newer endpoints ride the
//! [`ApiResponse`] envelope instead.

use serde::{Deserialize, Serialize};

// Re-export ApiResponse from response module
pub use crate::response::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
///
/// On success `token` and `user` are both set; on failure `message` carries
/// the reason and the other fields stay empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// User profile as stored in the session and returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub department: String,
    /// Cached permission tags. Absent until the permission lookup has run
    /// once for this profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl UserProfile {
    /// Initials for the avatar badge ("Jane van Dorn" -> "JV")
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

// =============================================================================
// Permission API DTOs
// =============================================================================

/// Response of `GET /api/auth/user-permissions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPermissionsResponse {
    pub role: String,
    pub permissions: Vec<String>,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// Response of `GET /api/roles/{role}/permissions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermissionsResponse {
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_initials() {
        let user = UserProfile {
            id: "1".to_string(),
            name: "Jane van Dorn".to_string(),
            email: "jane@tikidan.com".to_string(),
            role: "hr_manager".to_string(),
            department: "People".to_string(),
            permissions: None,
        };
        assert_eq!(user.initials(), "JV");
    }

    #[test]
    fn profile_permissions_default_to_absent() {
        let json = r#"{"id":"1","name":"A","email":"a@b.c","role":"employee"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert!(user.permissions.is_none());
        assert!(user.department.is_empty());
    }
}
