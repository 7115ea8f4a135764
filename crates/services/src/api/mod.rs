//! Backend REST surface.

use async_trait::async_trait;
use tryout_core::model::{
    AdminHasil, AdminSoal, AdminUser, Dashboard, Hasil, HasilQuery, Identity, Page, Question,
    SoalQuery, Subtest, SubtestCode, ValidSoal,
};

use crate::error::ApiError;

mod config;
mod http;
pub mod wire;

pub use config::{BackendConfig, DEFAULT_API_BASE_URL, derive_admin_url};
pub use http::HttpBackend;
pub use wire::SubmitRequest;

/// Everything the client asks of the backend.
#[async_trait]
pub trait TryoutApi: Send + Sync {
    /// `GET /subtests/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    async fn subtests(&self) -> Result<Vec<Subtest>, ApiError>;

    /// `GET /subtests/{code}/questions/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    async fn questions(&self, code: &SubtestCode) -> Result<Vec<Question>, ApiError>;

    /// `POST /submit-jawaban/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    async fn submit_answers(&self, request: &SubmitRequest) -> Result<Hasil, ApiError>;

    /// `GET /riwayat-nilai/{username}/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    async fn history(&self, username: &str) -> Result<Vec<Hasil>, ApiError>;

    /// `POST /auth/login/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for rejected credentials and
    /// `ApiError::Decode` when a 2xx response carries no user.
    async fn login(&self, username: &str, password: &str) -> Result<Identity, ApiError>;

    /// `GET /admin/dashboard/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    async fn admin_dashboard(&self, admin: &str) -> Result<Dashboard, ApiError>;

    /// `GET /admin/soal/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    async fn admin_soal(&self, admin: &str, query: &SoalQuery)
    -> Result<Page<AdminSoal>, ApiError>;

    /// `GET /admin/users/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    async fn admin_users(&self, admin: &str) -> Result<Vec<AdminUser>, ApiError>;

    /// `GET /admin/hasil/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    async fn admin_hasil(
        &self,
        admin: &str,
        query: &HasilQuery,
    ) -> Result<Page<AdminHasil>, ApiError>;

    /// Adds a question through the administrative site.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx response, or a
    /// redirect to the admin login page.
    async fn create_soal(&self, soal: &ValidSoal) -> Result<(), ApiError>;
}
