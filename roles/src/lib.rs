//! Shared role vocabulary for the marketplace.
//!
//! This crate owns the role names used by both the `client` route gate and
//! the functions server that stamps role claims into access tokens. Keeping
//! them in one place means the claim a token carries and the route group a
//! screen lives under can never drift apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

/// JWT claim key carrying the user's primary role.
pub const ROLE_CLAIM: &str = "user_role";

/// Error returned when parsing a [`Role`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleError {
    /// The input does not name any known role.
    #[error("unknown role: {0:?}")]
    Unknown(String),
}

/// Primary role of a marketplace account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Books lawn-care services.
    Customer,
    /// Performs booked jobs.
    Technician,
    /// Operates the marketplace.
    Admin,
}

impl Role {
    /// Every role, in redirect priority order (highest first).
    pub const ALL: [Self; 3] = [Self::Admin, Self::Technician, Self::Customer];

    /// Lowercase claim value, e.g. `"technician"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Technician => "technician",
            Self::Admin => "admin",
        }
    }

    /// Parse a raw claim value. Unknown values yield `None` rather than an
    /// error so that an unrecognized claim simply grants nothing.
    #[must_use]
    pub fn from_claim(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(raw))
    }

    /// Landing screen for this role.
    #[must_use]
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Self::Customer => "/(customer)/dashboard",
            Self::Technician => "/(technician)/dashboard",
            Self::Admin => "/(admin)/dashboard",
        }
    }

    /// Route-group segment that scopes screens to this role.
    #[must_use]
    pub fn route_group(self) -> &'static str {
        match self {
            Self::Customer => "(customer)",
            Self::Technician => "(technician)",
            Self::Admin => "(admin)",
        }
    }

    /// Map a route-group segment back to its role.
    #[must_use]
    pub fn from_route_group(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.route_group() == segment)
    }

    /// Whether a user may pick this role for themselves at sign-up.
    /// Admins are provisioned out of band.
    #[must_use]
    pub fn is_self_assignable(self) -> bool {
        !matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_claim(s).ok_or_else(|| RoleError::Unknown(s.to_owned()))
    }
}

/// Read the role claim out of a JSON claims object.
///
/// Returns `None` when the claim is absent, not a string, or unknown.
#[must_use]
pub fn role_from_claims(claims: &serde_json::Value) -> Option<Role> {
    claims
        .get(ROLE_CLAIM)
        .and_then(serde_json::Value::as_str)
        .and_then(Role::from_claim)
}
