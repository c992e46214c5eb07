//! Role-based access gate shared by every protected screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components must apply identical loading, unauthenticated, and
//! wrong-role behavior. The decision is a plain value; the caller performs
//! the navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use roles::Role;

use crate::state::auth::{AuthState, AuthStore, AuthSubscription};

/// Redirect target for unauthenticated access when none is given.
pub const DEFAULT_FALLBACK_PATH: &str = "/";

/// What a protected screen should do for the current auth state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Session still resolving; show a loading indicator.
    Loading,
    /// Replace the current route with this path.
    RedirectTo(String),
    /// Render the protected content.
    Render,
}

/// Decide access for `required` against `state`.
///
/// `None` as the required role admits any signed-in user. Nothing is read
/// from `state` beyond the loading flag until resolution has finished.
#[must_use]
pub fn decide(state: &AuthState, required: Option<Role>, fallback_path: &str) -> Outcome {
    if state.is_loading() {
        return Outcome::Loading;
    }
    if state.user().is_none() {
        return Outcome::RedirectTo(fallback_path.to_owned());
    }
    let Some(role) = required else {
        return Outcome::Render;
    };
    if state.has_role(role) {
        return Outcome::Render;
    }

    // Signed in with the wrong role: send them to their own dashboard.
    let target = state
        .primary_role()
        .map_or(fallback_path, |role| role.dashboard_path());
    Outcome::RedirectTo(target.to_owned())
}

/// Performs the navigation side effect of a redirect.
pub trait Navigator {
    /// Replace the current route with `path` (no back-stack entry).
    fn replace(&self, path: &str);
}

/// Gate configuration for one role-scoped area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtectedRoute {
    pub required_role: Option<Role>,
    pub fallback_path: String,
}

impl Default for ProtectedRoute {
    fn default() -> Self {
        Self { required_role: None, fallback_path: DEFAULT_FALLBACK_PATH.to_owned() }
    }
}

impl ProtectedRoute {
    /// Gate for `role` with the default fallback.
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        Self { required_role: Some(role), ..Self::default() }
    }

    #[must_use]
    pub fn with_fallback(mut self, path: impl Into<String>) -> Self {
        self.fallback_path = path.into();
        self
    }

    /// Decide against the store's current state.
    #[must_use]
    pub fn evaluate(&self, store: &AuthStore) -> Outcome {
        self.decide(&store.snapshot())
    }

    #[must_use]
    pub fn decide(&self, state: &AuthState) -> Outcome {
        decide(state, self.required_role, &self.fallback_path)
    }

    /// Wait for the next auth change and decide again.
    ///
    /// Returns `None` once the auth writer is gone.
    pub async fn next_outcome(&self, subscription: &mut AuthSubscription) -> Option<Outcome> {
        let state = subscription.changed().await.ok()?;
        Some(self.decide(&state))
    }

    /// Act on `outcome`: redirects are handed to `navigator`. Returns whether
    /// the protected content should be rendered.
    pub fn apply<N: Navigator + ?Sized>(&self, outcome: &Outcome, navigator: &N) -> bool {
        match outcome {
            Outcome::Loading => false,
            Outcome::RedirectTo(path) => {
                log::debug!("gate: redirecting to {path}");
                navigator.replace(path);
                false
            }
            Outcome::Render => true,
        }
    }
}
