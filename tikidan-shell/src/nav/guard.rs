//! Route guard
//!
//! Two gates, evaluated in order for every navigation attempt:
//! authentication first, then authorization against the permission set. The
//! decision function is total: every (session, permissions, path) triple
//! maps to exactly one outcome.

use super::menu::SECTIONS;
use crate::permissions::{Permission, PermissionSet};
use std::collections::HashMap;
use std::sync::OnceLock;

/// The login view; the only path an anonymous visitor may see
pub const LOGIN_ROUTE: &str = "/login";

/// The public landing path; always bounces to the login view
pub const LANDING_ROUTE: &str = "/";

/// Where authenticated users land, and where denied navigation falls back to
pub const DEFAULT_ROUTE: &str = "/reports";

/// Outcome of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested view
    Allow,
    /// No valid session: go authenticate
    RedirectToLogin,
    /// Authenticated but not permitted (or unknown path): fall back
    RedirectToDefault,
}

/// Permission gating a route, from the menu tables
///
/// Built once from the same tables the menu generator renders, so the
/// drawer and the guard cannot drift apart.
pub fn route_permission(path: &str) -> Option<Permission> {
    static ROUTE_MAP: OnceLock<HashMap<&'static str, Permission>> = OnceLock::new();
    let map = ROUTE_MAP.get_or_init(|| {
        SECTIONS
            .iter()
            .flat_map(|(_, table)| table.iter())
            .map(|item| (item.route, item.permission))
            .collect()
    });
    map.get(path).copied()
}

/// Decide a navigation attempt
///
/// Gate 1 (authentication): without a session everything but the login view
/// redirects to login, including the landing path.
///
/// Gate 2 (authorization): with a session, the login view stays reachable
/// (it clears the session on entry), the landing path still bounces to
/// login, a gated path allows iff its permission is granted, and anything
/// unknown falls back to the default route. A denied path never bounces an
/// authenticated user back to login.
pub fn authorize(authenticated: bool, permissions: &PermissionSet, path: &str) -> RouteDecision {
    if !authenticated {
        return if path == LOGIN_ROUTE {
            RouteDecision::Allow
        } else {
            RouteDecision::RedirectToLogin
        };
    }

    match path {
        LOGIN_ROUTE => RouteDecision::Allow,
        LANDING_ROUTE => RouteDecision::RedirectToLogin,
        _ => match route_permission(path) {
            Some(required) if permissions.allows(required) => RouteDecision::Allow,
            Some(_) => RouteDecision::RedirectToDefault,
            // Catch-all for unmatched paths
            None => RouteDecision::RedirectToDefault,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_visitors_only_see_the_login_view() {
        let none = PermissionSet::empty();
        assert_eq!(authorize(false, &none, LOGIN_ROUTE), RouteDecision::Allow);
        assert_eq!(
            authorize(false, &none, "/employees"),
            RouteDecision::RedirectToLogin
        );
        assert_eq!(authorize(false, &none, "/"), RouteDecision::RedirectToLogin);
        assert_eq!(
            authorize(false, &none, "/no-such-page"),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn missing_permission_falls_back_to_default_not_login() {
        let set = PermissionSet::from_tags(&["dashboard", "team"]);
        assert_eq!(
            authorize(true, &set, "/employees"),
            RouteDecision::RedirectToDefault
        );
    }

    #[test]
    fn wildcard_session_reaches_gated_routes() {
        let all = PermissionSet::from_tags(&["*"]);
        assert_eq!(authorize(true, &all, "/employees"), RouteDecision::Allow);
        assert_eq!(authorize(true, &all, "/billing"), RouteDecision::Allow);
    }

    #[test]
    fn granted_permission_allows_its_route() {
        let set = PermissionSet::from_tags(&["team"]);
        assert_eq!(authorize(true, &set, "/team"), RouteDecision::Allow);
        assert_eq!(
            authorize(true, &set, "/reports"),
            RouteDecision::RedirectToDefault
        );
    }

    #[test]
    fn unknown_paths_fall_back_to_default_when_authenticated() {
        let all = PermissionSet::from_tags(&["*"]);
        assert_eq!(
            authorize(true, &all, "/no-such-page"),
            RouteDecision::RedirectToDefault
        );
    }

    #[test]
    fn landing_path_bounces_to_login_even_when_authenticated() {
        let all = PermissionSet::from_tags(&["*"]);
        assert_eq!(authorize(true, &all, "/"), RouteDecision::RedirectToLogin);
    }

    #[test]
    fn every_menu_route_is_gated() {
        for (_, table) in SECTIONS {
            for item in *table {
                assert_eq!(route_permission(item.route), Some(item.permission));
            }
        }
        assert_eq!(route_permission(LOGIN_ROUTE), None);
        assert_eq!(route_permission(LANDING_ROUTE), None);
    }

    #[test]
    fn decision_is_total_over_arbitrary_inputs() {
        let sets = [
            PermissionSet::empty(),
            PermissionSet::from_tags(&["*"]),
            PermissionSet::from_tags(&["expenses", "team"]),
        ];
        let paths = ["", "/", "/login", "/team", "/team/", "/TEAM", "///", "/a b"];
        for authenticated in [false, true] {
            for set in &sets {
                for path in paths {
                    // Must return one of the three outcomes, never panic
                    let _ = authorize(authenticated, set, path);
                }
            }
        }
    }
}
