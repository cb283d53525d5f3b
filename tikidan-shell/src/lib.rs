//! Tikidan HR dashboard shell
//!
//! The session / permission / navigation core of the HR admin dashboard:
//! - [`session`] - persisted login session and the in-memory session context
//! - [`permissions`] - permission and role model plus remote resolution
//! - [`nav`] - menu generation and route guarding from one permission set
//! - [`shell`] - the composition layer the views talk to

pub mod config;
pub mod error;
pub mod logging;
pub mod nav;
pub mod permissions;
pub mod session;
pub mod shell;

mod employees;

pub use config::ShellConfig;
pub use error::ShellError;
pub use nav::guard::{authorize, RouteDecision};
pub use nav::menu::{generate_menus, MenuItem, MenuSection, SectionId};
pub use permissions::{Permission, PermissionSet, Role, StoredPermissions};
pub use session::{Session, SessionManager};
pub use shell::Shell;
