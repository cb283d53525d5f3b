//! In-memory backend state: seeded users, the role permission matrix and
//! the employee directory.

use shared::client::UserProfile;
use shared::models::EmployeeRecord;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Default permission sets per role, matching the production seed data
pub fn role_permissions(role: &str) -> Vec<String> {
    let tags: &[&str] = match role {
        "admin" => &["*"],
        "hr_manager" => &[
            "dashboard",
            "team",
            "employees",
            "attendance",
            "department",
            "holiday",
            "profile",
            "my_leaves",
            "team_leave",
            "leave_settings",
            "company",
        ],
        "sales_manager" => &[
            "dashboard",
            "projects",
            "clients",
            "meetings",
            "team",
            "expenses",
            "categories",
            "profile",
            "my_leaves",
        ],
        "employee" => &["dashboard", "team", "profile", "my_leaves"],
        _ => &[],
    };
    tags.iter().map(|s| s.to_string()).collect()
}

/// A seeded login account
#[derive(Debug, Clone)]
pub struct MockUser {
    pub password: String,
    pub profile: UserProfile,
}

/// Shared mock backend state
pub struct AppState {
    pub jwt_secret: String,
    users: HashMap<String, MockUser>,
    employees: RwLock<HashMap<String, EmployeeRecord>>,
}

impl AppState {
    /// State with the default seeded accounts
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        let mut users = HashMap::new();
        for (name, email, password, role, department) in [
            ("Admin", "admin@tikidan.com", "admin123", "admin", "Management"),
            ("Harper Reyes", "hr@tikidan.com", "hr123", "hr_manager", "People"),
            (
                "Sam Okafor",
                "sales@tikidan.com",
                "sales123",
                "sales_manager",
                "Sales",
            ),
            ("Devon Lim", "dev@tikidan.com", "dev123", "employee", "Engineering"),
        ] {
            users.insert(
                email.to_string(),
                MockUser {
                    password: password.to_string(),
                    profile: UserProfile {
                        id: format!("user-{}", email.split('@').next().unwrap_or(email)),
                        name: name.to_string(),
                        email: email.to_string(),
                        role: role.to_string(),
                        department: department.to_string(),
                        permissions: None,
                    },
                },
            );
        }

        let employees = users
            .values()
            .map(|user| {
                let record = EmployeeRecord {
                    id: user.profile.id.clone(),
                    name: user.profile.name.clone(),
                    email: user.profile.email.clone(),
                    role: user.profile.role.clone(),
                    department: user.profile.department.clone(),
                    permissions: role_permissions(&user.profile.role),
                    is_active: true,
                };
                (record.id.clone(), record)
            })
            .collect();

        Self {
            jwt_secret: jwt_secret.into(),
            users,
            employees: RwLock::new(employees),
        }
    }

    /// Check credentials, returning the profile on a match
    pub fn authenticate(&self, email: &str, password: &str) -> Option<UserProfile> {
        self.users
            .get(email)
            .filter(|user| user.password == password)
            .map(|user| user.profile.clone())
    }

    /// Look up a seeded profile by user id
    pub fn profile_by_id(&self, id: &str) -> Option<UserProfile> {
        self.users
            .values()
            .find(|user| user.profile.id == id)
            .map(|user| user.profile.clone())
    }

    pub fn employees(&self) -> &RwLock<HashMap<String, EmployeeRecord>> {
        &self.employees
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("tikidan-mock-secret-key-not-for-production")
    }
}
