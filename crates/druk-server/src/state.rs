use crate::auth::Sessions;

use druk_core::{Registry, Store};

use std::sync::Arc;

/// Everything the handlers share: the entity registry, the store driver
/// behind the persistence seam, and the admin session table.
pub struct AppState {
    pub registry: Arc<Registry>,
    pub store: Arc<dyn Store>,
    pub sessions: Sessions,
    admin_password: String,
}

pub type SharedState = Arc<AppState>;

impl std::fmt::Debug for AppState {
    // The admin password stays out of debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(registry: Arc<Registry>, store: Arc<dyn Store>, admin_password: String) -> Self {
        Self {
            registry,
            store,
            sessions: Sessions::default(),
            admin_password,
        }
    }

    pub fn shared(
        registry: Arc<Registry>,
        store: Arc<dyn Store>,
        admin_password: String,
    ) -> SharedState {
        Arc::new(Self::new(registry, store, admin_password))
    }

    /// Constant-time comparison against the configured admin password.
    pub fn password_matches(&self, candidate: &str) -> bool {
        let expected = self.admin_password.as_bytes();
        let got = candidate.as_bytes();
        if expected.len() != got.len() {
            return false;
        }
        expected
            .iter()
            .zip(got)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}
