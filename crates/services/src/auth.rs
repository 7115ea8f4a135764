use std::sync::Arc;

use chrono::Duration;
use storage::repository::{SessionRecord, SessionRepository};
use tracing::{info, warn};
use tryout_core::model::{Identity, Role};

use crate::Clock;
use crate::api::TryoutApi;
use crate::error::{ApiError, AuthError};

/// Lifetime of a session record.
pub const SESSION_TTL_HOURS: i64 = 8;

const DEFAULT_LOGIN_ERROR: &str = "Username atau password salah";
const DEFAULT_LANDING: &str = "/tryout";
const ADMIN_LANDING: &str = "/admin";

/// Signs users in against the backend and keeps the local session record.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    api: Arc<dyn TryoutApi>,
    sessions: Arc<dyn SessionRepository>,
}

impl AuthService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn TryoutApi>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            clock,
            api,
            sessions,
        }
    }

    /// Authenticate and persist a fresh session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` for blank input (no request is
    /// made), `AuthError::InvalidCredentials` when the backend rejects the
    /// login, or transport/storage errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let identity = match self.api.login(username, password).await {
            Ok(identity) => identity,
            Err(ApiError::Status { message, .. }) => {
                return Err(AuthError::InvalidCredentials(
                    message.unwrap_or_else(|| DEFAULT_LOGIN_ERROR.to_string()),
                ));
            }
            Err(ApiError::Decode(_)) => {
                return Err(AuthError::InvalidCredentials(DEFAULT_LOGIN_ERROR.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let now = self.clock.now();
        let record = SessionRecord::new(&identity, now, now + Duration::hours(SESSION_TTL_HOURS));
        self.sessions.save_session(&record).await?;
        info!(username = %identity.username, role = identity.role.as_str(), "signed in");
        Ok(identity)
    }

    /// Drop the session record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the record cannot be removed.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear_session().await?;
        info!("signed out");
        Ok(())
    }

    /// The live session's identity, clearing an expired record on the way.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the record cannot be read.
    pub async fn check_session(&self) -> Result<Option<Identity>, AuthError> {
        let Some(record) = self.sessions.load_session().await? else {
            return Ok(None);
        };
        if record.is_expired(self.clock.now()) {
            if let Err(err) = self.sessions.clear_session().await {
                warn!(error = %err, "failed to clear expired session");
            }
            return Ok(None);
        }
        Ok(Some(record.identity()))
    }
}

/// Where to go after signing in: admins to the dashboard, everyone else to
/// the requested in-app path or the tryout list.
#[must_use]
pub fn landing_path(role: Role, from: Option<&str>) -> String {
    if role == Role::Admin {
        return ADMIN_LANDING.to_string();
    }
    from.map(str::trim)
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .filter(|path| !path.starts_with("/login"))
        .unwrap_or(DEFAULT_LANDING)
        .to_string()
}
