use std::sync::Arc;

use dioxus::prelude::*;
use services::{AdminService, AttemptService, AuthService, HistoryService, IdentityProvider};
use tryout_core::model::{BatchId, Identity};

pub trait UiApp: Send + Sync {
    fn batches(&self) -> Vec<BatchId>;

    fn identity(&self) -> Arc<dyn IdentityProvider>;
    fn auth(&self) -> Arc<AuthService>;
    fn attempts(&self) -> Arc<AttemptService>;
    fn history(&self) -> Arc<HistoryService>;
    fn admin(&self) -> Arc<AdminService>;
}

#[derive(Clone)]
pub struct AppContext {
    batches: Arc<[BatchId]>,

    identity: Arc<dyn IdentityProvider>,
    auth: Arc<AuthService>,
    attempts: Arc<AttemptService>,
    history: Arc<HistoryService>,
    admin: Arc<AdminService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            batches: app.batches().into(),
            identity: app.identity(),
            auth: app.auth(),
            attempts: app.attempts(),
            history: app.history(),
            admin: app.admin(),
        }
    }

    #[must_use]
    pub fn batches(&self) -> &[BatchId] {
        &self.batches
    }

    /// Resolver handed to every view that needs to know who is signed in.
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

/// The identity shown in the shell, refreshed on login and logout.
///
/// Provided by the layout; views outside it (and the test harness) run
/// without one, so consumers use `try_use_context`.
#[derive(Clone, Copy)]
pub struct CurrentUser(pub Signal<Option<Identity>>);

impl CurrentUser {
    pub fn set(mut self, identity: Identity) {
        self.0.set(Some(identity));
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
