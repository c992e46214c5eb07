//! Identity records exchanged with the identity provider.
//!
//! DESIGN
//! ======
//! Role claims are kept as the raw strings the provider issued. Parsing into
//! [`Role`] happens when auth state is derived, so an unrecognized claim is
//! carried along harmlessly instead of failing deserialization.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use roles::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signed-in account as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name from the profile, if set.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Raw role claims (normally exactly one, from the `user_role` claim).
    #[serde(default)]
    pub role_claims: Vec<String>,
}

impl User {
    /// Roles named by recognized claims, in claim order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.role_claims.iter().filter_map(|claim| Role::from_claim(claim))
    }

    /// Whether any claim names `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles().any(|r| r == role)
    }
}

/// An authenticated session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    /// Access-token expiry in seconds since the Unix epoch, if known.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// Email + password sign-in payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Role-specific sign-up details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RoleDetails {
    Customer {
        street_address: String,
        #[serde(default)]
        lot_size_sqft: Option<u32>,
    },
    Technician {
        service_area: String,
        years_experience: u8,
    },
}

impl RoleDetails {
    /// The role these details belong to.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Customer { .. } => Role::Customer,
            Self::Technician { .. } => Role::Technician,
        }
    }
}

/// Completed sign-up payload produced by the registration wizard.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
    pub details: RoleDetails,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("phone", &self.phone)
            .field("role", &self.role)
            .field("details", &self.details)
            .finish()
    }
}
