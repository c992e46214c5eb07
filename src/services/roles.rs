//! Role directory backed by the `profiles` table.
//!
//! ARCHITECTURE
//! ============
//! The trait is the seam the HTTP handlers depend on; the Postgres
//! implementation forwards each call to one stored procedure
//! (`get_user_role`, `ensure_user_role`) defined in the migrations.

use roles::Role;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RoleLookupError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    /// The stored role is not one the app knows about.
    #[error("stored role is invalid: {0:?}")]
    InvalidRole(String),
}

/// Read/write access to account roles.
#[async_trait::async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Role stored for `user_id`, if the account has a profile.
    async fn user_role(&self, user_id: Uuid) -> Result<Option<Role>, RoleLookupError>;

    /// Record `requested` for an account without a role and return the
    /// stored role (which differs from `requested` if one was already set).
    async fn ensure_user_role(&self, user_id: Uuid, requested: Role) -> Result<Role, RoleLookupError>;
}

pub struct PgRoleDirectory {
    pool: PgPool,
}

impl PgRoleDirectory {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RoleDirectory for PgRoleDirectory {
    async fn user_role(&self, user_id: Uuid) -> Result<Option<Role>, RoleLookupError> {
        let raw: Option<String> = sqlx::query_scalar("SELECT get_user_role($1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        raw.map(parse_stored_role).transpose()
    }

    async fn ensure_user_role(&self, user_id: Uuid, requested: Role) -> Result<Role, RoleLookupError> {
        let raw: String = sqlx::query_scalar("SELECT ensure_user_role($1, $2)")
            .bind(user_id)
            .bind(requested.as_str())
            .fetch_one(&self.pool)
            .await?;
        parse_stored_role(raw)
    }
}

pub(crate) fn parse_stored_role(raw: String) -> Result<Role, RoleLookupError> {
    Role::from_claim(&raw).ok_or(RoleLookupError::InvalidRole(raw))
}

#[cfg(test)]
#[path = "roles_test.rs"]
mod tests;
