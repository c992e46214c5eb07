//! Route table and navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Screens live under file-router style paths. A parenthesized group segment
//! such as `(technician)` scopes every screen beneath it to that role; the
//! `(auth)` group and the landing page are public. Every navigation runs
//! through [`navigate`], which applies the access gate for the target path.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use roles::Role;

use crate::state::auth::{AuthState, AuthStore};
use crate::util::auth::{DEFAULT_FALLBACK_PATH, Outcome, decide};

/// Route group holding sign-in and sign-up screens.
pub const AUTH_GROUP: &str = "(auth)";
pub const LOGIN_PATH: &str = "/(auth)/login";
pub const REGISTER_PATH: &str = "/(auth)/register";

/// Every screen the app ships.
pub const ROUTES: &[&str] = &[
    "/",
    LOGIN_PATH,
    REGISTER_PATH,
    "/(customer)/dashboard",
    "/(customer)/book-service",
    "/(customer)/bookings",
    "/(customer)/profile",
    "/(technician)/dashboard",
    "/(technician)/jobs",
    "/(technician)/schedule",
    "/(technician)/profile",
    "/(admin)/dashboard",
    "/(admin)/users",
    "/(admin)/technicians",
    "/(admin)/services",
    "/settings",
];

/// Who may open a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Role(Role),
    /// Path contains `.` or `..` segments; never opened.
    Invalid,
}

/// Route segments of `path` with query, fragment, empty and trailing
/// segments dropped. `None` if any segment is `.` or `..`.
fn route_segments(path: &str) -> Option<Vec<&str>> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.iter().any(|s| matches!(*s, "." | "..")) {
        return None;
    }
    Some(segments)
}

/// Access requirement for `path`, derived from its route-group segments.
///
/// Query strings and trailing slashes are ignored. The first role group wins.
#[must_use]
pub fn required_access(path: &str) -> Access {
    let Some(segments) = route_segments(path) else {
        return Access::Invalid;
    };
    if segments.is_empty() {
        return Access::Public;
    }
    for segment in segments {
        if segment == AUTH_GROUP {
            return Access::Public;
        }
        if let Some(role) = Role::from_route_group(segment) {
            return Access::Role(role);
        }
    }
    Access::Authenticated
}

/// Whether `path` names a shipped screen.
#[must_use]
pub fn is_known_route(path: &str) -> bool {
    route_segments(path).is_some_and(|segments| {
        let normalized = format!("/{}", segments.join("/"));
        ROUTES.contains(&normalized.as_str())
    })
}

/// Gate a navigation to `path` against the current auth state.
///
/// Public screens render immediately, even while the session is resolving.
#[must_use]
pub fn navigate(store: &AuthStore, path: &str) -> Outcome {
    navigate_state(&store.snapshot(), path)
}

/// [`navigate`] against an explicit state.
#[must_use]
pub fn navigate_state(state: &AuthState, path: &str) -> Outcome {
    match required_access(path) {
        Access::Public => Outcome::Render,
        Access::Authenticated => decide(state, None, DEFAULT_FALLBACK_PATH),
        Access::Role(role) => decide(state, Some(role), DEFAULT_FALLBACK_PATH),
        Access::Invalid => Outcome::RedirectTo(DEFAULT_FALLBACK_PATH.to_owned()),
    }
}

/// Where a freshly signed-in user lands: their role dashboard, or the landing
/// page when no role claim is recognized.
#[must_use]
pub fn home_for(state: &AuthState) -> &'static str {
    state
        .primary_role()
        .map_or(DEFAULT_FALLBACK_PATH, Role::dashboard_path)
}
