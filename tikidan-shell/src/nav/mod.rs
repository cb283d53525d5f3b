//! Navigation: menu generation and route guarding
//!
//! Both sides consume the same static tables in [`menu`]; the guard's
//! route-to-permission map is derived from them, never maintained by hand.

pub mod guard;
pub mod menu;

pub use guard::{authorize, RouteDecision, DEFAULT_ROUTE, LANDING_ROUTE, LOGIN_ROUTE};
pub use menu::{generate_menus, MenuItem, MenuSection, SectionId};
