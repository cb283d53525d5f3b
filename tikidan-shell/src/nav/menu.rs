//! Static menu tables and menu generation
//!
//! Four drawer sections, declared in on-screen order. Every gated route in
//! the application appears in exactly one section; the guard derives its
//! route map from these tables.
//!
//! The expenses section deliberately gates all of its entries on the single
//! coarse `expenses` tag: granting it reveals the whole expenses workflow
//! at once.

use crate::permissions::{Permission, PermissionSet};

const ACCENT_BLUE: &str = "#2196f3";

/// One drawer entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub permission: Permission,
    pub route: &'static str,
    pub icon: &'static str,
    pub accent: &'static str,
}

const fn item(
    label: &'static str,
    permission: Permission,
    route: &'static str,
    icon: &'static str,
) -> MenuItem {
    MenuItem {
        label,
        permission,
        route,
        icon,
        accent: ACCENT_BLUE,
    }
}

/// Main section
pub const MAIN_MENU: &[MenuItem] = &[
    item("Reports", Permission::Dashboard, "/reports", "dashboard"),
    item("Projects", Permission::Projects, "/projects", "work"),
    item("Clients", Permission::Clients, "/clients", "people"),
    item("Meetings", Permission::Meetings, "/meetings", "event_note"),
    item("Team", Permission::Team, "/team", "group"),
];

/// Expenses section
pub const EXPENSES_MENU: &[MenuItem] = &[
    item("Expenses", Permission::Expenses, "/expenses", "attach_money"),
    item(
        "Review Expenses",
        Permission::Expenses,
        "/review-expenses",
        "rate_review",
    ),
    item(
        "Approved Expenses",
        Permission::Expenses,
        "/approved-expenses",
        "check_circle",
    ),
    item(
        "Rejected Expenses",
        Permission::Expenses,
        "/rejected-expenses",
        "cancel",
    ),
    item(
        "Expenses Report",
        Permission::Expenses,
        "/expenses-report",
        "assessment",
    ),
    item(
        "Payment Pending",
        Permission::Expenses,
        "/payment-pending",
        "hourglass_empty",
    ),
    item("Expense Paid", Permission::Expenses, "/expense-paid", "payment"),
    item(
        "Manage Categories",
        Permission::Expenses,
        "/manage-categories",
        "category",
    ),
    item(
        "Expense Settings",
        Permission::Expenses,
        "/expense-settings",
        "manage_accounts",
    ),
];

/// My Account section
pub const ACCOUNT_MENU: &[MenuItem] = &[
    item("Profile", Permission::Profile, "/profile", "person"),
    item("My Leave", Permission::MyLeaves, "/my-leave", "calendar_month"),
    item("Team Leave", Permission::TeamLeave, "/team-leave", "group_work"),
    item(
        "Leave Settings",
        Permission::LeaveSettings,
        "/leave-settings",
        "settings",
    ),
];

/// Company section
pub const COMPANY_MENU: &[MenuItem] = &[
    item("Company", Permission::Company, "/company", "business"),
    item("Attendance", Permission::Attendance, "/attendance", "schedule"),
    item("Employees", Permission::Employees, "/employees", "badge"),
    item("Categories", Permission::Categories, "/categories", "category"),
    item("Department", Permission::Department, "/department", "group_work"),
    item("Branches", Permission::Branches, "/branches", "location_on"),
    item("Holiday", Permission::Holiday, "/holiday", "event"),
    item("Billing", Permission::Billing, "/billing", "receipt"),
    item(
        "Company Profile",
        Permission::Company,
        "/company-profile",
        "account_balance",
    ),
];

/// Drawer section identity, in on-screen order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Main,
    Expenses,
    Account,
    Company,
}

impl SectionId {
    pub const fn title(&self) -> &'static str {
        match self {
            SectionId::Main => "Main",
            SectionId::Expenses => "Expenses",
            SectionId::Account => "My Account",
            SectionId::Company => "Company",
        }
    }
}

/// All sections with their static tables, in declaration order
pub const SECTIONS: &[(SectionId, &[MenuItem])] = &[
    (SectionId::Main, MAIN_MENU),
    (SectionId::Expenses, EXPENSES_MENU),
    (SectionId::Account, ACCOUNT_MENU),
    (SectionId::Company, COMPANY_MENU),
];

/// A rendered drawer section: only admitted items, never empty
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub id: SectionId,
    pub items: Vec<&'static MenuItem>,
}

impl MenuSection {
    pub fn title(&self) -> &'static str {
        self.id.title()
    }
}

/// Derive the visible navigation from a permission set
///
/// Pure: same set in, same sections out. The wildcard admits every item;
/// otherwise an item is admitted iff its permission is granted. Declaration
/// order is preserved and sections with no admitted items are omitted from
/// the result entirely (an empty section header is never rendered).
pub fn generate_menus(permissions: &PermissionSet) -> Vec<MenuSection> {
    SECTIONS
        .iter()
        .filter_map(|(id, table)| {
            let items: Vec<&'static MenuItem> = table
                .iter()
                .filter(|item| permissions.allows(item.permission))
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(MenuSection { id: *id, items })
            }
        })
        .collect()
}
