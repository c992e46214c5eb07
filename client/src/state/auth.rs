//! Auth-session state for the current app user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by route guards and role-aware screens to decide between a loading
//! view, a redirect, or the protected content. Written only by the session
//! driver, which owns the single [`AuthWriter`].
//!
//! DESIGN
//! ======
//! The state lives in a `tokio::sync::watch` channel: one writer, any number
//! of readers, and readers that re-run their decision on every change. Role
//! flags are computed from the user's claims each time a state is built; there
//! is no setter for them, so they cannot drift from `user`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use roles::Role;
use tokio::sync::watch;

use crate::net::types::User;

/// Errors surfaced to auth-state readers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The session driver was dropped; no further updates will arrive.
    #[error("auth state writer closed")]
    WriterClosed,
}

// =============================================================================
// AUTH STATE
// =============================================================================

/// Authentication state tracking the current user, loading status, and the
/// role flags derived from the user's claims.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
    loading: bool,
    is_admin: bool,
    is_technician: bool,
    is_customer: bool,
}

impl AuthState {
    /// Session resolution in progress. Carries no user and no role flags.
    #[must_use]
    pub fn loading() -> Self {
        Self { user: None, loading: true, is_admin: false, is_technician: false, is_customer: false }
    }

    /// Resolution finished with `user` (or nobody signed in).
    #[must_use]
    pub fn resolved(user: Option<User>) -> Self {
        let has = |role| user.as_ref().is_some_and(|u| u.has_role(role));
        Self {
            is_admin: has(Role::Admin),
            is_technician: has(Role::Technician),
            is_customer: has(Role::Customer),
            user,
            loading: false,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    #[must_use]
    pub fn is_technician(&self) -> bool {
        self.is_technician
    }

    #[must_use]
    pub fn is_customer(&self) -> bool {
        self.is_customer
    }

    /// Flag corresponding to `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        match role {
            Role::Admin => self.is_admin,
            Role::Technician => self.is_technician,
            Role::Customer => self.is_customer,
        }
    }

    /// First set flag in priority order (admin, technician, customer).
    #[must_use]
    pub fn primary_role(&self) -> Option<Role> {
        Role::ALL.into_iter().find(|role| self.has_role(*role))
    }
}

impl Default for AuthState {
    /// A fresh process starts out resolving its persisted session.
    fn default() -> Self {
        Self::loading()
    }
}

// =============================================================================
// CHANNEL
// =============================================================================

/// Create the process-wide auth state, starting in the loading state.
#[must_use]
pub fn auth_channel() -> (AuthWriter, AuthStore) {
    let (tx, rx) = watch::channel(AuthState::default());
    (AuthWriter { tx }, AuthStore { rx })
}

/// The single write handle. Deliberately not `Clone`.
#[derive(Debug)]
pub struct AuthWriter {
    tx: watch::Sender<AuthState>,
}

impl AuthWriter {
    /// Enter a resolution window (startup, sign-in, sign-out).
    pub fn begin_resolution(&self) {
        log::debug!("auth: resolving session");
        self.tx.send_replace(AuthState::loading());
    }

    /// Finish resolution with the given user, or nobody.
    pub fn publish(&self, user: Option<User>) {
        let state = AuthState::resolved(user);
        log::debug!(
            "auth: resolved signed_in={} role={:?}",
            state.user.is_some(),
            state.primary_role()
        );
        self.tx.send_replace(state);
    }

    /// Replace the signed-in user without a loading window (token refresh,
    /// claim change). Flags are recomputed from the new claims.
    ///
    /// Ignored while a resolution is in flight or nobody is signed in; the
    /// resolution's own outcome wins. Returns whether the state changed.
    pub fn update_user(&self, user: User) -> bool {
        self.tx.send_if_modified(|state| {
            if state.loading || state.user.is_none() {
                log::debug!(
                    "auth: dropped user update for {} (loading={})",
                    user.id,
                    state.loading
                );
                return false;
            }
            *state = AuthState::resolved(Some(user.clone()));
            log::debug!("auth: user updated role={:?}", state.primary_role());
            true
        })
    }

    /// A read handle onto the state this writer owns.
    #[must_use]
    pub fn store(&self) -> AuthStore {
        AuthStore { rx: self.tx.subscribe() }
    }
}

/// Cheap, cloneable read handle.
#[derive(Clone, Debug)]
pub struct AuthStore {
    rx: watch::Receiver<AuthState>,
}

impl AuthStore {
    /// Current state, read synchronously.
    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.rx.borrow().clone()
    }

    /// Subscribe to changes made after this call.
    #[must_use]
    pub fn subscribe(&self) -> AuthSubscription {
        let mut rx = self.rx.clone();
        rx.borrow_and_update();
        AuthSubscription { rx }
    }
}

/// Change stream for one reader.
#[derive(Debug)]
pub struct AuthSubscription {
    rx: watch::Receiver<AuthState>,
}

impl AuthSubscription {
    /// Wait for the next state change and return the new state.
    ///
    /// Intermediate states may be skipped if several changes land before the
    /// reader wakes; the returned state is always the latest.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::WriterClosed`] once the writer is dropped.
    pub async fn changed(&mut self) -> Result<AuthState, AuthError> {
        self.rx.changed().await.map_err(|_| AuthError::WriterClosed)?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Latest state without waiting.
    #[must_use]
    pub fn current(&self) -> AuthState {
        self.rx.borrow().clone()
    }
}
