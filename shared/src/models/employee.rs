//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee record as returned by the directory endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Role reference (String ID)
    pub role: String,
    #[serde(default)]
    pub department: String,
    /// Permission tags granted to this employee
    #[serde(default)]
    pub permissions: Vec<String>,
    pub is_active: bool,
}

/// Create employee payload
///
/// `permissions` may be omitted; the backend seeds the starting set from the
/// assigned role's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Role reference (String ID)
    pub role: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Role reference (String ID)
    pub role: Option<String>,
    pub department: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub is_active: Option<bool>,
}
