use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::api::{SubmitRequest, TryoutApi};
use services::error::ApiError;
use services::{
    AdminService, AppServices, AttemptService, AuthService, HistoryService, IdentityProvider,
};
use storage::repository::{SessionRecord, Storage};
use tryout_core::model::{
    AdminHasil, AdminSoal, AdminUser, BatchId, Dashboard, Hasil, HasilQuery, Identity, Page,
    Pagination, Question, QuestionOption, SoalId, SoalQuery, Subtest, SubtestCode, ValidSoal,
};
use tryout_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::{AdminView, AttemptView, BatchView, HistoryView, LoginView, TryoutView};

/// In-process backend with canned responses.
#[derive(Default)]
pub struct FakeApi {
    pub subtests: Vec<Subtest>,
    pub subtests_fail: bool,
    pub questions: Vec<Question>,
    pub history_rows: Vec<Hasil>,
    pub dashboard: Dashboard,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TryoutApi for FakeApi {
    async fn subtests(&self) -> Result<Vec<Subtest>, ApiError> {
        self.record("subtests".to_string());
        if self.subtests_fail {
            return Err(ApiError::Status {
                status: 502,
                message: None,
            });
        }
        Ok(self.subtests.clone())
    }

    async fn questions(&self, code: &SubtestCode) -> Result<Vec<Question>, ApiError> {
        self.record(format!("questions:{code}"));
        Ok(self.questions.clone())
    }

    async fn submit_answers(&self, _request: &SubmitRequest) -> Result<Hasil, ApiError> {
        self.record("submit".to_string());
        Err(ApiError::Status {
            status: 503,
            message: None,
        })
    }

    async fn history(&self, username: &str) -> Result<Vec<Hasil>, ApiError> {
        self.record(format!("history:{username}"));
        Ok(self.history_rows.clone())
    }

    async fn login(&self, username: &str, _password: &str) -> Result<Identity, ApiError> {
        self.record(format!("login:{username}"));
        Err(ApiError::Status {
            status: 401,
            message: None,
        })
    }

    async fn admin_dashboard(&self, admin: &str) -> Result<Dashboard, ApiError> {
        self.record(format!("dashboard:{admin}"));
        Ok(self.dashboard.clone())
    }

    async fn admin_soal(
        &self,
        _admin: &str,
        query: &SoalQuery,
    ) -> Result<Page<AdminSoal>, ApiError> {
        Ok(Page {
            results: Vec::new(),
            pagination: Pagination::single_page(query.page, query.limit, 0),
        })
    }

    async fn admin_users(&self, _admin: &str) -> Result<Vec<AdminUser>, ApiError> {
        Ok(Vec::new())
    }

    async fn admin_hasil(
        &self,
        _admin: &str,
        query: &HasilQuery,
    ) -> Result<Page<AdminHasil>, ApiError> {
        Ok(Page {
            results: Vec::new(),
            pagination: Pagination::single_page(query.page, query.limit, 0),
        })
    }

    async fn create_soal(&self, _soal: &ValidSoal) -> Result<(), ApiError> {
        Ok(())
    }
}

pub fn subtest(code: &str, title: &str) -> Subtest {
    let code = SubtestCode::new(code);
    Subtest {
        id: code.to_id(),
        code,
        title: title.to_string(),
        description: String::new(),
        duration: None,
        question_count: 2,
    }
}

pub fn question(soal_id: u64, prompt: &str) -> Question {
    Question {
        id: format!("q{soal_id}"),
        soal_id: SoalId::from_number(soal_id),
        subtest_id: "pu".to_string(),
        prompt: prompt.to_string(),
        image_url: None,
        options: ["A", "B", "C"]
            .iter()
            .map(|key| QuestionOption {
                key: (*key).to_string(),
                text: format!("Pilihan {key}"),
            })
            .collect(),
        answer: "A".to_string(),
        explanation: None,
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn batches(&self) -> Vec<BatchId> {
        self.services.batches().to_vec()
    }

    fn identity(&self) -> Arc<dyn IdentityProvider> {
        self.services.identity()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn attempts(&self) -> Arc<AttemptService> {
        self.services.attempts()
    }

    fn history(&self) -> Arc<HistoryService> {
        self.services.history()
    }

    fn admin(&self) -> Arc<AdminService> {
        self.services.admin()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Tryout,
    Batch {
        done: &'static str,
        reason: &'static str,
    },
    Attempt(&'static str),
    History,
    Admin,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView { from: String::new() } },
        ViewKind::Tryout => rsx! { TryoutView {} },
        ViewKind::Batch { done, reason } => rsx! {
            BatchView {
                batch_id: BATCH.to_string(),
                done: done.to_string(),
                reason: reason.to_string(),
            }
        },
        ViewKind::Attempt(code) => rsx! {
            AttemptView { batch_id: BATCH.to_string(), subtest: code.to_string() }
        },
        ViewKind::History => rsx! { HistoryView {} },
        ViewKind::Admin => rsx! { AdminView {} },
    }
}

pub const BATCH: &str = "batch-1";

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub api: Arc<FakeApi>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Builds the view over in-memory storage. `identity` is stored as an
/// active session before the first render.
pub async fn setup_view_harness(
    view: ViewKind,
    api: FakeApi,
    identity: Option<Identity>,
) -> ViewHarness {
    let storage = Storage::in_memory();
    let clock = fixed_clock();
    if let Some(identity) = identity {
        let now = clock.now();
        let record = SessionRecord::new(&identity, now, now + Duration::hours(8));
        storage
            .sessions
            .save_session(&record)
            .await
            .expect("save session");
    }

    let api = Arc::new(api);
    let services = AppServices::from_parts(
        storage.clone(),
        Arc::clone(&api) as Arc<dyn TryoutApi>,
        clock,
        vec![BatchId::new(BATCH)],
    );
    let app = Arc::new(TestApp { services });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, storage, api }
}
