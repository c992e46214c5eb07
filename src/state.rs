//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the role directory the functions consult and the shared secret the
//! auth platform must present.

use std::sync::Arc;

use crate::services::roles::RoleDirectory;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub roles: Arc<dyn RoleDirectory>,
    pub hook_secret: Arc<str>,
}

impl AppState {
    #[must_use]
    pub fn new(roles: Arc<dyn RoleDirectory>, hook_secret: &str) -> Self {
        Self { roles, hook_secret: Arc::from(hook_secret) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use roles::Role;
    use uuid::Uuid;

    use super::*;
    use crate::services::roles::RoleLookupError;

    pub const TEST_SECRET: &str = "test-hook-secret";

    /// In-memory directory with the same semantics as the stored procedures.
    #[derive(Default)]
    pub struct FakeDirectory {
        pub roles: Mutex<HashMap<Uuid, Role>>,
        pub fail: bool,
        pub calls: AtomicUsize,
    }

    impl FakeDirectory {
        #[must_use]
        pub fn with_role(user_id: Uuid, role: Role) -> Self {
            let dir = Self::default();
            dir.roles.lock().unwrap().insert(user_id, role);
            dir
        }

        #[must_use]
        pub fn failing() -> Self {
            Self { fail: true, ..Self::default() }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl RoleDirectory for FakeDirectory {
        async fn user_role(&self, user_id: Uuid) -> Result<Option<Role>, RoleLookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RoleLookupError::Db(sqlx::Error::PoolTimedOut));
            }
            Ok(self.roles.lock().unwrap().get(&user_id).copied())
        }

        async fn ensure_user_role(&self, user_id: Uuid, requested: Role) -> Result<Role, RoleLookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RoleLookupError::Db(sqlx::Error::PoolTimedOut));
            }
            Ok(*self.roles.lock().unwrap().entry(user_id).or_insert(requested))
        }
    }

    /// App state over `dir` with [`TEST_SECRET`].
    #[must_use]
    pub fn test_app_state(dir: Arc<FakeDirectory>) -> AppState {
        AppState::new(dir, TEST_SECRET)
    }
}
