//! Resolves who is using the client.

use std::sync::Arc;

use async_trait::async_trait;
use storage::repository::SessionRepository;
use tracing::warn;
use tryout_core::model::Identity;

use crate::Clock;

/// Source of the current identity, injected into every service that needs one.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The signed-in identity, or the guest identity when there is none.
    async fn identity(&self) -> Identity;
}

/// Reads the persisted session record, honoring its expiry.
#[derive(Clone)]
pub struct SessionIdentityProvider {
    clock: Clock,
    sessions: Arc<dyn SessionRepository>,
}

impl SessionIdentityProvider {
    #[must_use]
    pub fn new(clock: Clock, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { clock, sessions }
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentityProvider {
    async fn identity(&self) -> Identity {
        match self.sessions.load_session().await {
            Ok(Some(record)) if !record.is_expired(self.clock.now()) => record.identity(),
            Ok(_) => Identity::guest(),
            Err(err) => {
                warn!(error = %err, "session record unreadable; continuing as guest");
                Identity::guest()
            }
        }
    }
}

/// Always returns the same identity.
#[derive(Clone, Debug)]
pub struct FixedIdentityProvider(Identity);

impl FixedIdentityProvider {
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self(identity)
    }

    #[must_use]
    pub fn guest() -> Self {
        Self(Identity::guest())
    }
}

#[async_trait]
impl IdentityProvider for FixedIdentityProvider {
    async fn identity(&self) -> Identity {
        self.0.clone()
    }
}
