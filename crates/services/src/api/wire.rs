//! Request and response bodies that only exist on the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tryout_core::model::{Hasil, Identity, Page, Pagination, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitRequest {
    pub username: String,
    pub subtest_code: String,
    pub batch_id: String,
    #[serde(rename = "jawaban")]
    pub answers: BTreeMap<String, String>,
    #[serde(rename = "durasi_detik", skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    pub hasil: Hasil,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginUser {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl LoginUser {
    pub(crate) fn into_identity(self) -> Identity {
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.username.clone());
        Identity::new(self.username, name, Role::from_backend(self.role.as_deref()))
    }
}

/// `{error}` or `{detail}` body of a failed request.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub(crate) fn message(self) -> Option<String> {
        self.error
            .or(self.detail)
            .filter(|message| !message.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> ListResponse<T> {
    /// Uses the backend pagination, or one page covering what came back.
    pub(crate) fn into_page(self, page: u32, limit: u32) -> Page<T> {
        let pagination = self
            .pagination
            .unwrap_or_else(|| Pagination::single_page(page, limit, self.results.len()));
        Page {
            results: self.results,
            pagination,
        }
    }
}
