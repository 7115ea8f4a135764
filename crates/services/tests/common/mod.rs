#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use services::api::{SubmitRequest, TryoutApi};
use services::error::ApiError;
use services::session::FixedIdentityProvider;
use services::{AppServices, Clock};
use storage::repository::Storage;
use tryout_core::model::{
    AdminHasil, AdminSoal, AdminUser, BatchId, Dashboard, Hasil, HasilId, HasilQuery, Identity,
    Page, Pagination, Question, QuestionOption, Role, SoalId, SoalQuery, Subtest, SubtestCode,
    ValidSoal,
};

/// Scriptable in-process backend that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub subtests: Vec<Subtest>,
    pub subtests_fail: bool,
    pub questions: Vec<Question>,
    /// `None` makes the history endpoint fail.
    pub history_rows: Option<Vec<Hasil>>,
    pub submit_fails: bool,
    /// `None` makes login fail with 401.
    pub login_user: Option<Identity>,
    pub admin_status: Option<u16>,
    pub calls: Mutex<Vec<String>>,
    pub submitted: Mutex<Vec<SubmitRequest>>,
    pub created: Mutex<Vec<ValidSoal>>,
}

impl FakeApi {
    pub fn with_subtest(questions: Vec<Question>) -> Self {
        Self {
            subtests: vec![subtest("PU", 30.0)],
            questions,
            history_rows: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<SubmitRequest> {
        self.submitted.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn admin_result(&self) -> Result<(), ApiError> {
        match self.admin_status {
            Some(status) => Err(ApiError::Status {
                status,
                message: Some("Akses ditolak".into()),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TryoutApi for FakeApi {
    async fn subtests(&self) -> Result<Vec<Subtest>, ApiError> {
        self.record("subtests");
        if self.subtests_fail {
            return Err(ApiError::Status {
                status: 502,
                message: Some("bad gateway".into()),
            });
        }
        Ok(self.subtests.clone())
    }

    async fn questions(&self, code: &SubtestCode) -> Result<Vec<Question>, ApiError> {
        self.record(&format!("questions:{code}"));
        Ok(self.questions.clone())
    }

    async fn submit_answers(&self, request: &SubmitRequest) -> Result<Hasil, ApiError> {
        self.record("submit");
        self.submitted.lock().unwrap().push(request.clone());
        if self.submit_fails {
            return Err(ApiError::Status {
                status: 500,
                message: Some("server error".into()),
            });
        }
        Ok(hasil(1, &request.batch_id, &request.subtest_code, 75.0, None))
    }

    async fn history(&self, username: &str) -> Result<Vec<Hasil>, ApiError> {
        self.record(&format!("history:{username}"));
        self.history_rows.clone().ok_or(ApiError::Status {
            status: 500,
            message: None,
        })
    }

    async fn login(&self, username: &str, _password: &str) -> Result<Identity, ApiError> {
        self.record(&format!("login:{username}"));
        self.login_user.clone().ok_or(ApiError::Status {
            status: 401,
            message: Some("Username atau password salah".into()),
        })
    }

    async fn admin_dashboard(&self, admin: &str) -> Result<Dashboard, ApiError> {
        self.record(&format!("dashboard:{admin}"));
        self.admin_result()?;
        Ok(Dashboard::default())
    }

    async fn admin_soal(
        &self,
        admin: &str,
        query: &SoalQuery,
    ) -> Result<Page<AdminSoal>, ApiError> {
        self.record(&format!("soal:{admin}"));
        self.admin_result()?;
        Ok(Page {
            results: Vec::new(),
            pagination: Pagination::single_page(query.page, query.limit, 0),
        })
    }

    async fn admin_users(&self, admin: &str) -> Result<Vec<AdminUser>, ApiError> {
        self.record(&format!("users:{admin}"));
        self.admin_result()?;
        Ok(Vec::new())
    }

    async fn admin_hasil(
        &self,
        admin: &str,
        query: &HasilQuery,
    ) -> Result<Page<AdminHasil>, ApiError> {
        self.record(&format!("hasil:{admin}"));
        self.admin_result()?;
        Ok(Page {
            results: Vec::new(),
            pagination: Pagination::single_page(query.page, query.limit, 0),
        })
    }

    async fn create_soal(&self, soal: &ValidSoal) -> Result<(), ApiError> {
        self.record("create_soal");
        self.admin_result()?;
        self.created.lock().unwrap().push(soal.clone());
        Ok(())
    }
}

pub fn subtest(code: &str, minutes: f64) -> Subtest {
    let code = SubtestCode::new(code);
    Subtest {
        id: code.to_id(),
        title: format!("Subtest {code}"),
        code,
        description: String::new(),
        duration: Some(minutes),
        question_count: 3,
    }
}

pub fn question(id: &str, soal_id: Option<u64>) -> Question {
    Question {
        id: id.into(),
        soal_id: soal_id.and_then(SoalId::from_number),
        subtest_id: "pu".into(),
        prompt: format!("Question {id}"),
        image_url: None,
        options: ["A", "B", "C", "D", "E"]
            .iter()
            .map(|key| QuestionOption {
                key: (*key).into(),
                text: format!("Option {key}"),
            })
            .collect(),
        answer: "A".into(),
        explanation: None,
    }
}

pub fn hasil(id: u64, batch: &str, code: &str, score: f64, date: Option<&str>) -> Hasil {
    Hasil {
        id: HasilId::new(id),
        batch_id: batch.into(),
        subtest_code: code.into(),
        subtest_name: format!("Subtest {code}"),
        correct: 3,
        incorrect: 1,
        blank: 0,
        score,
        completed_at: None,
        date: date.map(str::to_string),
    }
}

pub fn student() -> Identity {
    Identity::new("budi", "Budi", Role::Student)
}

pub fn admin() -> Identity {
    Identity::new("admin", "Admin", Role::Admin)
}

/// Services over in-memory storage whose identity comes from the stored session.
pub fn app_services(api: Arc<FakeApi>, clock: Clock) -> (AppServices, Storage) {
    let storage = Storage::in_memory();
    let services = AppServices::from_parts(
        storage.clone(),
        api,
        clock,
        vec![BatchId::new("batch-1")],
    );
    (services, storage)
}

pub fn fixed_identity(identity: Identity) -> Arc<FixedIdentityProvider> {
    Arc::new(FixedIdentityProvider::new(identity))
}

/// Store a session record valid for eight hours from `clock`.
pub async fn sign_in(storage: &Storage, identity: &Identity, clock: Clock) {
    let now = clock.now();
    let record = storage::repository::SessionRecord::new(
        identity,
        now,
        now + chrono::Duration::hours(8),
    );
    storage.sessions.save_session(&record).await.unwrap();
}
