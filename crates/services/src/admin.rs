use std::sync::Arc;

use tracing::info;
use tryout_core::model::{
    AdminHasil, AdminSoal, AdminUser, Dashboard, HasilQuery, Page, SoalDraft, SoalQuery,
    ValidSoal,
};

use crate::api::TryoutApi;
use crate::error::AdminError;
use crate::session::IdentityProvider;

/// Administrative reads and question creation. Every call checks the
/// identity first and makes no request for non-admins.
#[derive(Clone)]
pub struct AdminService {
    api: Arc<dyn TryoutApi>,
    identity: Arc<dyn IdentityProvider>,
}

impl AdminService {
    #[must_use]
    pub fn new(api: Arc<dyn TryoutApi>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { api, identity }
    }

    async fn admin_username(&self) -> Result<String, AdminError> {
        let identity = self.identity.identity().await;
        if identity.is_guest() {
            return Err(AdminError::SessionInvalid);
        }
        if !identity.is_admin() {
            return Err(AdminError::Forbidden);
        }
        Ok(identity.username)
    }

    /// # Errors
    ///
    /// Returns `AdminError` for a missing or non-admin session, a 403, or
    /// any other backend failure.
    pub async fn dashboard(&self) -> Result<Dashboard, AdminError> {
        let admin = self.admin_username().await?;
        Ok(self.api.admin_dashboard(&admin).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError` for a missing or non-admin session, a 403, or
    /// any other backend failure.
    pub async fn list_soal(&self, query: &SoalQuery) -> Result<Page<AdminSoal>, AdminError> {
        let admin = self.admin_username().await?;
        Ok(self.api.admin_soal(&admin, query).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError` for a missing or non-admin session, a 403, or
    /// any other backend failure.
    pub async fn list_users(&self) -> Result<Vec<AdminUser>, AdminError> {
        let admin = self.admin_username().await?;
        Ok(self.api.admin_users(&admin).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError` for a missing or non-admin session, a 403, or
    /// any other backend failure.
    pub async fn list_hasil(&self, query: &HasilQuery) -> Result<Page<AdminHasil>, AdminError> {
        let admin = self.admin_username().await?;
        Ok(self.api.admin_hasil(&admin, query).await?)
    }

    /// Validate and post a new question.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Draft` for an invalid form (nothing is sent),
    /// session errors, or backend failures.
    pub async fn create_soal(&self, draft: &SoalDraft) -> Result<ValidSoal, AdminError> {
        let admin = self.admin_username().await?;
        let soal = draft.validate()?;
        self.api.create_soal(&soal).await?;
        info!(%admin, subtest = %soal.subtest, "question created");
        Ok(soal)
    }
}
