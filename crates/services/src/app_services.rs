use std::sync::Arc;

use storage::repository::Storage;
use tryout_core::model::BatchId;

use crate::Clock;
use crate::admin::AdminService;
use crate::api::{BackendConfig, HttpBackend, TryoutApi};
use crate::attempts::AttemptService;
use crate::auth::AuthService;
use crate::error::AppServicesError;
use crate::history::HistoryService;
use crate::progress::ProgressService;
use crate::session::{IdentityProvider, SessionIdentityProvider};

/// Assembles app-facing services around one backend and one local store.
#[derive(Clone)]
pub struct AppServices {
    batches: Vec<BatchId>,
    identity: Arc<dyn IdentityProvider>,
    auth: Arc<AuthService>,
    attempts: Arc<AttemptService>,
    history: Arc<HistoryService>,
    admin: Arc<AdminService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        backend: BackendConfig,
        clock: Clock,
        batches: Vec<BatchId>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let api: Arc<dyn TryoutApi> = Arc::new(HttpBackend::new(backend));
        Ok(Self::from_parts(storage, api, clock, batches))
    }

    /// Wire services over existing storage and an API implementation.
    #[must_use]
    pub fn from_parts(
        storage: Storage,
        api: Arc<dyn TryoutApi>,
        clock: Clock,
        batches: Vec<BatchId>,
    ) -> Self {
        let identity: Arc<dyn IdentityProvider> = Arc::new(SessionIdentityProvider::new(
            clock,
            Arc::clone(&storage.sessions),
        ));
        let auth = Arc::new(AuthService::new(
            clock,
            Arc::clone(&api),
            Arc::clone(&storage.sessions),
        ));
        let history = Arc::new(HistoryService::new(
            clock,
            Arc::clone(&api),
            Arc::clone(&identity),
            Arc::clone(&storage.local),
        ));
        let attempts = Arc::new(AttemptService::new(
            Arc::clone(&api),
            Arc::clone(&identity),
            ProgressService::new(Arc::clone(&storage.local)),
            Arc::clone(&history),
        ));
        let admin = Arc::new(AdminService::new(Arc::clone(&api), Arc::clone(&identity)));

        Self {
            batches,
            identity,
            auth,
            attempts,
            history,
            admin,
        }
    }

    #[must_use]
    pub fn batches(&self) -> &[BatchId] {
        &self.batches
    }

    #[must_use]
    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn attempts(&self) -> Arc<AttemptService> {
        Arc::clone(&self.attempts)
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn admin(&self) -> Arc<AdminService> {
        Arc::clone(&self.admin)
    }
}
