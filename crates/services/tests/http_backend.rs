use std::collections::BTreeMap;

use serde_json::json;
use services::api::{BackendConfig, HttpBackend, SubmitRequest, TryoutApi};
use services::error::ApiError;
use tryout_core::model::{HasilQuery, Role, SoalDraft, SoalQuery, SubtestCode};
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(
        BackendConfig::new(format!("{}/api", server.uri()))
            .with_admin_url(format!("{}/admin", server.uri())),
    )
}

#[tokio::test]
async fn fetches_subtests_and_questions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/subtests/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "pu", "code": "PU", "title": "Penalaran Umum", "description": "",
             "duration": 17.5, "questionCount": 2}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/subtests/PU/questions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "pu-1", "soal_id": 41, "subtestId": "pu", "question": "Q1",
             "question_image": null, "options": [{"key": "A", "text": "x"}], "answer": "A"},
            {"id": "pu-2", "soal_id": "", "subtestId": "pu", "question": "Q2",
             "options": [], "answer": "B"}
        ])))
        .mount(&server)
        .await;

    let api = backend(&server);
    let subtests = api.subtests().await.unwrap();
    assert_eq!(subtests.len(), 1);
    assert_eq!(subtests[0].duration_secs(), 1050);

    let questions = api.questions(&SubtestCode::new("PU")).await.unwrap();
    assert_eq!(questions[0].answer_key(0), "41");
    assert_eq!(questions[1].answer_key(1), "1");
}

#[tokio::test]
async fn submits_answers_with_backend_field_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit-jawaban/"))
        .and(body_json(json!({
            "username": "budi",
            "subtest_code": "PU",
            "batch_id": "batch-1",
            "jawaban": {"41": "A", "2": "C"},
            "durasi_detik": 95
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "hasil": {"id": 9, "subtest_code": "PU", "subtest_nama": "Penalaran Umum",
                      "batch_id": "batch-1", "jumlah_benar": 1, "jumlah_salah": 1,
                      "jumlah_kosong": 0, "skor": 50.0,
                      "waktu_selesai": "2025-01-01T10:00:00+00:00"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SubmitRequest {
        username: "budi".into(),
        subtest_code: "PU".into(),
        batch_id: "batch-1".into(),
        answers: BTreeMap::from([
            ("41".to_string(), "A".to_string()),
            ("2".to_string(), "C".to_string()),
        ]),
        duration_secs: Some(95),
    };
    let hasil = backend(&server).submit_answers(&request).await.unwrap();
    assert_eq!(hasil.correct, 1);
    assert_eq!(hasil.completion_date().as_deref(), Some("2025-01-01"));
}

#[tokio::test]
async fn error_body_message_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit-jawaban/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Jawaban kosong. Pastikan Anda sudah mengisi jawaban sebelum submit."
        })))
        .mount(&server)
        .await;

    let request = SubmitRequest {
        username: "budi".into(),
        subtest_code: "PU".into(),
        batch_id: "batch-1".into(),
        answers: BTreeMap::new(),
        duration_secs: None,
    };
    let err = backend(&server).submit_answers(&request).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.user_message().starts_with("Jawaban kosong"), "{err}");
}

#[tokio::test]
async fn history_path_encodes_username() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/riwayat-nilai/budi%20s/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "batch_id": "batch-1", "subtest_code": "PU", "subtest_nama": "PU",
             "jumlah_benar": 1, "jumlah_salah": 0, "jumlah_kosong": 0, "skor": 100.0,
             "waktu_selesai": null, "tanggal": "2025-01-02"}
        ])))
        .mount(&server)
        .await;

    let rows = backend(&server).history("budi s").await.unwrap();
    assert_eq!(rows[0].date.as_deref(), Some("2025-01-02"));
}

#[tokio::test]
async fn login_maps_user_and_rejections() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"username": "admin", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "user": {"username": "admin", "name": "Site Admin", "role": "admin"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"username": "budi", "password": "nope"})))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Username atau password salah"})),
        )
        .mount(&server)
        .await;

    let api = backend(&server);
    let identity = api.login("admin", "pw").await.unwrap();
    assert_eq!(identity.role, Role::Admin);
    assert_eq!(identity.name, "Site Admin");

    match api.login("budi", "nope").await.unwrap_err() {
        ApiError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Username atau password salah"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn admin_listing_sends_filters_and_reads_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/soal/"))
        .and(query_param("username", "admin"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "50"))
        .and(query_param("subtest_code", "PK"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 7, "subtest_code": "PK", "subtest_nama": "Pengetahuan Kuantitatif",
                         "soal_text": "1+1?", "soal_image": null, "has_image": false,
                         "option_a": "1", "option_b": "2", "option_c": "", "option_d": null,
                         "option_e": null, "correct_answer": "B", "created_at": "2025-01-01T00:00:00"}],
            "pagination": {"page": 2, "limit": 50, "total": 51, "total_pages": 2,
                           "has_next": false, "has_prev": true}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/hasil/"))
        .and(query_param("admin_username", "admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let api = backend(&server);
    let page = api
        .admin_soal(
            "admin",
            &SoalQuery {
                page: 2,
                subtest_code: Some("PK".into()),
                search: Some("  ".into()),
                ..SoalQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 51);
    assert_eq!(page.results[0].options(), vec![('A', "1"), ('B', "2")]);

    let hasil = api.admin_hasil("admin", &HasilQuery::default()).await.unwrap();
    assert!(hasil.results.is_empty());
    assert_eq!(hasil.pagination.total, 0);
    assert!(!hasil.pagination.has_prev);
}

#[tokio::test]
async fn admin_forbidden_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Akses ditolak"})))
        .mount(&server)
        .await;

    let err = backend(&server).admin_dashboard("budi").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn create_soal_posts_admin_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/quiz/soal/add/"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(body_string_contains("pertanyaan=Berapa"))
        .and(body_string_contains("kunci_jawaban=B"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let soal = SoalDraft {
        subtest: SubtestCode::new("PK"),
        prompt: "Berapa 1+1?".into(),
        options: vec!["1".into(), "2".into()],
        answer_key: Some('B'),
    }
    .validate()
    .unwrap();
    backend(&server).create_soal(&soal).await.unwrap();
}
