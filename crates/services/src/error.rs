//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use tryout_core::attempt::AttemptError;
use tryout_core::model::SoalDraftError;

/// Errors emitted by the backend client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("unexpected backend response: {0}")]
    Decode(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status of a non-2xx response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            }
            | ApiError::Decode(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("Username & password wajib")]
    MissingCredentials,
    #[error("{0}")]
    InvalidCredentials(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AttemptService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptServiceError {
    #[error("subtest {0} not found")]
    UnknownSubtest(String),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AdminService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdminError {
    #[error("no active session")]
    SessionInvalid,
    #[error("admin access required")]
    Forbidden,
    #[error(transparent)]
    Draft(#[from] SoalDraftError),
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for AdminError {
    fn from(err: ApiError) -> Self {
        match err.status() {
            Some(401) => AdminError::SessionInvalid,
            Some(403) => AdminError::Forbidden,
            _ => AdminError::Api(err),
        }
    }
}

/// Errors emitted by `HistoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
