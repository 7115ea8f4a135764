#![forbid(unsafe_code)]

pub mod admin;
pub mod api;
pub mod app_services;
pub mod attempts;
pub mod auth;
pub mod error;
pub mod history;
pub mod progress;
pub mod session;

pub use tryout_core::Clock;

pub use admin::AdminService;
pub use api::{BackendConfig, HttpBackend, TryoutApi};
pub use app_services::AppServices;
pub use attempts::{AttemptService, AttemptTarget, BatchSubtest, Delivery, SubmitOutcome};
pub use auth::{AuthService, SESSION_TTL_HOURS, landing_path};
pub use error::{
    AdminError, ApiError, AppServicesError, AttemptServiceError, AuthError, HistoryError,
};
pub use history::{HistoryService, HistorySource, HistoryView};
pub use progress::ProgressService;
pub use session::{FixedIdentityProvider, IdentityProvider, SessionIdentityProvider};
