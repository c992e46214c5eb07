//! Session driver: the only writer of auth state.
//!
//! ARCHITECTURE
//! ============
//! Startup calls [`SessionDriver::resolve`] once; screens call `sign_in`,
//! `sign_up` and `sign_out`; the provider's change listener feeds
//! [`SessionDriver::apply`]. Sign-in and sign-out re-enter the loading window
//! so no screen decides on a half-updated identity.
//!
//! TRADE-OFFS
//! ==========
//! Every provider failure ends in the signed-out state. The gate cannot tell
//! "never signed in" from "session expired" from "network down"; callers that
//! need the reason get it from the returned `ProviderError`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use crate::net::provider::{AuthEvent, IdentityProvider, ProviderError};
use crate::net::types::{Credentials, Registration};
use crate::state::auth::{AuthStore, AuthWriter, auth_channel};

pub struct SessionDriver {
    provider: Arc<dyn IdentityProvider>,
    writer: AuthWriter,
}

impl SessionDriver {
    /// Create the driver and the auth state it owns. The state starts loading
    /// until [`SessionDriver::resolve`] runs.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> (Self, AuthStore) {
        let (writer, store) = auth_channel();
        (Self { provider, writer }, store)
    }

    #[must_use]
    pub fn store(&self) -> AuthStore {
        self.writer.store()
    }

    /// Restore the persisted session.
    pub async fn resolve(&self) {
        self.writer.begin_resolution();
        match self.provider.current_session().await {
            Ok(session) => self.writer.publish(session.map(|s| s.user)),
            Err(e) => {
                log::warn!("session restore failed: {e}");
                self.writer.publish(None);
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the provider's error; auth state is left signed out.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<(), ProviderError> {
        self.writer.begin_resolution();
        match self.provider.sign_in(credentials).await {
            Ok(session) => {
                self.writer.publish(Some(session.user));
                Ok(())
            }
            Err(e) => {
                log::warn!("sign-in failed for {}: {e}", credentials.email);
                self.writer.publish(None);
                Err(e)
            }
        }
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns the provider's error; auth state is left signed out.
    pub async fn sign_up(&self, registration: &Registration) -> Result<(), ProviderError> {
        self.writer.begin_resolution();
        match self.provider.sign_up(registration).await {
            Ok(session) => {
                self.writer.publish(Some(session.user));
                Ok(())
            }
            Err(e) => {
                log::warn!("sign-up failed for {}: {e}", registration.email);
                self.writer.publish(None);
                Err(e)
            }
        }
    }

    /// End the session. Local state is signed out even if the provider call
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns the provider's error after signing out locally.
    pub async fn sign_out(&self) -> Result<(), ProviderError> {
        self.writer.begin_resolution();
        let result = self.provider.sign_out().await;
        if let Err(e) = &result {
            log::warn!("provider sign-out failed: {e}");
        }
        self.writer.publish(None);
        result
    }

    /// Apply a change pushed by the provider. Refreshes and user updates that
    /// land during a sign-in or sign-out are dropped.
    pub fn apply(&self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) => self.writer.publish(Some(session.user)),
            AuthEvent::SignedOut => self.writer.publish(None),
            AuthEvent::TokenRefreshed(session) => {
                self.writer.update_user(session.user);
            }
            AuthEvent::UserUpdated(user) => {
                self.writer.update_user(user);
            }
        }
    }
}
