use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use tryout_core::model::{
    AdminHasil, AdminSoal, AdminUser, Dashboard, Hasil, HasilQuery, Identity, Page, Question,
    SoalQuery, Subtest, SubtestCode, ValidSoal,
};

use super::config::BackendConfig;
use super::wire::{
    ErrorBody, ListResponse, LoginRequest, LoginResponse, SubmitRequest, SubmitResponse,
};
use super::TryoutApi;
use crate::error::ApiError;

/// `reqwest` implementation of [`TryoutApi`].
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        join_segments(&self.config.api_base_url, segments)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.client.get(url).query(query).send().await?;
        read_json(response).await
    }
}

/// Appends path segments to `base` with a trailing slash, percent-encoding each.
fn join_segments(base: &str, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = Url::parse(base.trim_end_matches('/'))
        .map_err(|err| ApiError::InvalidUrl(format!("{base}: {err}")))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments)
        .push("");
    Ok(url)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn page_params(page: u32, limit: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("limit", limit.to_string())]
}

fn push_filter(params: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        params.push((name, value.to_string()));
    }
}

#[async_trait]
impl TryoutApi for HttpBackend {
    async fn subtests(&self) -> Result<Vec<Subtest>, ApiError> {
        let url = self.endpoint(&["subtests"])?;
        self.get_json(url, &[]).await
    }

    async fn questions(&self, code: &SubtestCode) -> Result<Vec<Question>, ApiError> {
        let url = self.endpoint(&["subtests", code.as_str(), "questions"])?;
        self.get_json(url, &[]).await
    }

    #[instrument(skip(self, request), fields(subtest = %request.subtest_code, answers = request.answers.len()))]
    async fn submit_answers(&self, request: &SubmitRequest) -> Result<Hasil, ApiError> {
        let url = self.endpoint(&["submit-jawaban"])?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(request).send().await?;
        let body: SubmitResponse = read_json(response).await?;
        Ok(body.hasil)
    }

    async fn history(&self, username: &str) -> Result<Vec<Hasil>, ApiError> {
        let url = self.endpoint(&["riwayat-nilai", username])?;
        self.get_json(url, &[]).await
    }

    #[instrument(skip(self, password))]
    async fn login(&self, username: &str, password: &str) -> Result<Identity, ApiError> {
        let url = self.endpoint(&["auth", "login"])?;
        let response = self
            .client
            .post(url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let body: LoginResponse = read_json(response).await?;
        match body.user {
            Some(user) if body.ok => Ok(user.into_identity()),
            _ => Err(ApiError::Decode("login response without user".into())),
        }
    }

    async fn admin_dashboard(&self, admin: &str) -> Result<Dashboard, ApiError> {
        let url = self.endpoint(&["admin", "dashboard"])?;
        self.get_json(url, &[("username", admin.to_string())]).await
    }

    async fn admin_soal(
        &self,
        admin: &str,
        query: &SoalQuery,
    ) -> Result<Page<AdminSoal>, ApiError> {
        let url = self.endpoint(&["admin", "soal"])?;
        let mut params = vec![("username", admin.to_string())];
        params.extend(page_params(query.page, query.limit));
        push_filter(&mut params, "subtest_code", query.subtest_code.as_deref());
        push_filter(&mut params, "search", query.search.as_deref());
        let body: ListResponse<AdminSoal> = self.get_json(url, &params).await?;
        Ok(body.into_page(query.page, query.limit))
    }

    async fn admin_users(&self, admin: &str) -> Result<Vec<AdminUser>, ApiError> {
        let url = self.endpoint(&["admin", "users"])?;
        self.get_json(url, &[("username", admin.to_string())]).await
    }

    async fn admin_hasil(
        &self,
        admin: &str,
        query: &HasilQuery,
    ) -> Result<Page<AdminHasil>, ApiError> {
        let url = self.endpoint(&["admin", "hasil"])?;
        let mut params = vec![("admin_username", admin.to_string())];
        params.extend(page_params(query.page, query.limit));
        push_filter(&mut params, "username", query.username.as_deref());
        push_filter(&mut params, "subtest_code", query.subtest_code.as_deref());
        let body: ListResponse<AdminHasil> = self.get_json(url, &params).await?;
        Ok(body.into_page(query.page, query.limit))
    }

    #[instrument(skip(self, soal), fields(subtest = %soal.subtest))]
    async fn create_soal(&self, soal: &ValidSoal) -> Result<(), ApiError> {
        let url = join_segments(&self.config.admin_url, &["quiz", "soal", "add"])?;
        let answer_key = soal.answer_key.to_string();
        let form = [
            ("pertanyaan", soal.prompt.clone()),
            ("subtest", soal.subtest.to_string()),
            ("pilihan", soal.options_text()),
            ("kunci_jawaban", answer_key),
        ];
        debug!(%url, "POST form");
        let response = self
            .client
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&form)
            .send()
            .await?;
        if response.url().path().contains("/login") {
            return Err(ApiError::Status {
                status: 401,
                message: Some("admin login required".into()),
            });
        }
        ensure_success(response).await.map(|_| ())
    }
}
