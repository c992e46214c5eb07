//! Identity provider interface and auth-change events.
//!
//! The BaaS auth client sits behind [`IdentityProvider`]. Nothing in the
//! client crate speaks its wire protocol; the session driver only awaits
//! these calls and republishes the outcome as auth state.

use async_trait::async_trait;

use super::types::{Credentials, Registration, Session, User};

/// Failures reported by the identity provider.
///
/// The gate never sees these: every variant collapses into an
/// unauthenticated state once it reaches the session driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("session expired")]
    SessionExpired,
    #[error("network error: {0}")]
    Network(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Session change pushed by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
    /// Access token was reissued; claims may have changed.
    TokenRefreshed(Session),
    /// Profile or role claim changed without a new sign-in.
    UserUpdated(User),
}

/// Async interface to the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Restore the persisted session, if any.
    async fn current_session(&self) -> Result<Option<Session>, ProviderError>;

    /// Sign in with email and password.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, ProviderError>;

    /// Create an account and sign it in.
    async fn sign_up(&self, registration: &Registration) -> Result<Session, ProviderError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}
