//! Permission and role model
//!
//! One source of truth for the capability tags the backend hands out. The
//! menu tables and the route guard both speak [`Permission`], so the two can
//! never disagree about what a tag means.

pub mod resolver;

pub use resolver::{PermissionResolver, PermissionSource};

use shared::client::UserProfile;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A navigable capability tag
///
/// Closed set: the backend only ever grants these. [`Permission::All`] is the
/// wildcard `"*"` meaning every permission is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Wildcard: all permissions granted
    All,
    Dashboard,
    Projects,
    Clients,
    Meetings,
    Team,
    Expenses,
    Categories,
    Profile,
    MyLeaves,
    TeamLeave,
    LeaveSettings,
    Company,
    Attendance,
    Employees,
    Department,
    Branches,
    Holiday,
    Billing,
}

impl Permission {
    /// The wire tag for this permission
    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::All => "*",
            Permission::Dashboard => "dashboard",
            Permission::Projects => "projects",
            Permission::Clients => "clients",
            Permission::Meetings => "meetings",
            Permission::Team => "team",
            Permission::Expenses => "expenses",
            Permission::Categories => "categories",
            Permission::Profile => "profile",
            Permission::MyLeaves => "my_leaves",
            Permission::TeamLeave => "team_leave",
            Permission::LeaveSettings => "leave_settings",
            Permission::Company => "company",
            Permission::Attendance => "attendance",
            Permission::Employees => "employees",
            Permission::Department => "department",
            Permission::Branches => "branches",
            Permission::Holiday => "holiday",
            Permission::Billing => "billing",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized permission tags
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission tag: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "*" => Permission::All,
            "dashboard" => Permission::Dashboard,
            "projects" => Permission::Projects,
            "clients" => Permission::Clients,
            "meetings" => Permission::Meetings,
            "team" => Permission::Team,
            "expenses" => Permission::Expenses,
            "categories" => Permission::Categories,
            "profile" => Permission::Profile,
            "my_leaves" => Permission::MyLeaves,
            "team_leave" => Permission::TeamLeave,
            "leave_settings" => Permission::LeaveSettings,
            "company" => Permission::Company,
            "attendance" => Permission::Attendance,
            "employees" => Permission::Employees,
            "department" => Permission::Department,
            "branches" => Permission::Branches,
            "holiday" => Permission::Holiday,
            "billing" => Permission::Billing,
            other => return Err(UnknownPermission(other.to_string())),
        })
    }
}

/// A user's granted permission set
///
/// Wraps the raw tags with the wildcard rule: a set containing
/// [`Permission::All`] allows everything, the empty set allows nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    granted: HashSet<Permission>,
}

impl PermissionSet {
    /// The empty set: denies every gated route and menu entry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse backend tags into a set
    ///
    /// Unknown tags are dropped with a warning rather than rejected; an
    /// unrecognized tag can only ever deny, so this stays fail-closed.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        let mut granted = HashSet::new();
        for tag in tags {
            match tag.as_ref().parse::<Permission>() {
                Ok(permission) => {
                    granted.insert(permission);
                }
                Err(err) => tracing::warn!(%err, "dropping unrecognized permission tag"),
            }
        }
        Self { granted }
    }

    /// Exact membership test (the wildcard does not short-circuit this)
    pub fn contains(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }

    /// Whether this set grants `permission`
    pub fn allows(&self, permission: Permission) -> bool {
        self.granted.contains(&Permission::All) || self.granted.contains(&permission)
    }

    /// Whether the wildcard is present
    pub fn has_all(&self) -> bool {
        self.granted.contains(&Permission::All)
    }

    pub fn insert(&mut self, permission: Permission) {
        self.granted.insert(permission);
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Wire tags for persistence, sorted for stable output
    pub fn to_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.granted.iter().map(|p| p.as_str().to_string()).collect();
        tags.sort();
        tags
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().collect(),
        }
    }
}

/// Cached-or-unresolved permission state of a stored user profile
///
/// Replaces an "is the optional field set" check with a total match: an
/// absent or empty `permissions` array means the lookup has not produced
/// anything usable yet.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredPermissions {
    Cached(PermissionSet),
    Unresolved,
}

impl StoredPermissions {
    pub fn from_profile(user: &UserProfile) -> Self {
        match &user.permissions {
            Some(tags) if !tags.is_empty() => Self::Cached(PermissionSet::from_tags(tags)),
            _ => Self::Unresolved,
        }
    }
}

/// A job-function role
///
/// Open-ended set defined by the backend; only used for display formatting
/// and permission resolution fallback, so unknown names are carried through
/// as [`Role::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    HrManager,
    SalesManager,
    Employee,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::HrManager => "hr_manager",
            Role::SalesManager => "sales_manager",
            Role::Employee => "employee",
            Role::Other(name) => name,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Human-readable form for the top bar ("hr_manager" -> "Hr Manager")
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            "hr_manager" => Role::HrManager,
            "sales_manager" => Role::SalesManager,
            "employee" => Role::Employee,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(permissions: Option<Vec<String>>) -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "Test User".to_string(),
            email: "test@tikidan.com".to_string(),
            role: "employee".to_string(),
            department: String::new(),
            permissions,
        }
    }

    #[test]
    fn wildcard_allows_everything() {
        let set = PermissionSet::from_tags(&["*"]);
        assert!(set.allows(Permission::Employees));
        assert!(set.allows(Permission::Billing));
        assert!(!set.contains(Permission::Employees));
    }

    #[test]
    fn empty_set_denies_everything() {
        let set = PermissionSet::empty();
        assert!(!set.allows(Permission::Dashboard));
        assert!(!set.allows(Permission::All));
    }

    #[test]
    fn unknown_tags_are_dropped_not_fatal() {
        let set = PermissionSet::from_tags(&["dashboard", "warp_drive", "team"]);
        assert_eq!(set.len(), 2);
        assert!(set.allows(Permission::Dashboard));
        assert!(set.allows(Permission::Team));
    }

    #[test]
    fn tags_round_trip() {
        let set = PermissionSet::from_tags(&["team", "dashboard"]);
        assert_eq!(set.to_tags(), vec!["dashboard", "team"]);
    }

    #[test]
    fn absent_and_empty_permissions_are_unresolved() {
        assert_eq!(
            StoredPermissions::from_profile(&profile(None)),
            StoredPermissions::Unresolved
        );
        assert_eq!(
            StoredPermissions::from_profile(&profile(Some(vec![]))),
            StoredPermissions::Unresolved
        );
    }

    #[test]
    fn cached_permissions_are_detected() {
        let stored = StoredPermissions::from_profile(&profile(Some(vec!["team".to_string()])));
        match stored {
            StoredPermissions::Cached(set) => assert!(set.allows(Permission::Team)),
            StoredPermissions::Unresolved => panic!("expected cached set"),
        }
    }

    #[test]
    fn role_display_name() {
        assert_eq!(Role::from("hr_manager").display_name(), "Hr Manager");
        assert_eq!(Role::from("admin").display_name(), "Admin");
        assert_eq!(Role::from("field_ops_lead").display_name(), "Field Ops Lead");
    }

    #[test]
    fn unknown_roles_survive() {
        let role = Role::from("payroll_clerk");
        assert_eq!(role, Role::Other("payroll_clerk".to_string()));
        assert_eq!(role.as_str(), "payroll_clerk");
        assert!(!role.is_admin());
    }
}
