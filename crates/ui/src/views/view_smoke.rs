use storage::repository::LocalStoreExt;
use tryout_core::history::{HistoryEntry, HistoryStatus, OFFLINE_HISTORY_KEY};
use tryout_core::model::{Identity, ProgressMarker, Role, SubtestStat, progress_key};

use super::test_harness::{BATCH, FakeApi, ViewKind, question, setup_view_harness, subtest};

fn student() -> Identity {
    Identity::new("budi", "Budi", Role::Student)
}

#[tokio::test(flavor = "current_thread")]
async fn tryout_view_lists_configured_batches() {
    let mut harness = setup_view_harness(ViewKind::Tryout, FakeApi::default(), None).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains(BATCH), "missing batch in {html}");
    assert!(html.contains("Kerjakan"), "missing start link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn batch_view_marks_done_subtests_and_shows_time_notice() {
    let api = FakeApi {
        subtests: vec![
            subtest("PU", "Penalaran Umum"),
            subtest("PK", "Pengetahuan Kuantitatif"),
        ],
        ..FakeApi::default()
    };
    let view = ViewKind::Batch {
        done: "pu",
        reason: "time",
    };
    let mut harness = setup_view_harness(view, api, Some(student())).await;
    let mut marker = ProgressMarker::default();
    marker.mark_done("pu");
    harness
        .storage
        .local
        .set_json(&progress_key("budi", BATCH), &marker)
        .await
        .expect("save marker");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Waktu habis"), "missing notice in {html}");
    assert!(html.contains("Selesai"), "missing done badge in {html}");
    assert!(html.contains("Mulai"), "missing start link for PK in {html}");
    assert!(html.contains("30 menit"), "missing duration in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn batch_view_shows_empty_list_when_subtests_are_unreachable() {
    let api = FakeApi {
        subtests_fail: true,
        ..FakeApi::default()
    };
    let view = ViewKind::Batch { done: "", reason: "" };
    let mut harness = setup_view_harness(view, api, Some(student())).await;

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Belum ada subtest"), "missing empty list in {html}");
    assert!(!html.contains("Coba lagi"), "error state shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn attempt_view_renders_first_question_with_full_timer() {
    let api = FakeApi {
        subtests: vec![subtest("PU", "Penalaran Umum")],
        questions: vec![question(7, "Soal pertama"), question(8, "Soal kedua")],
        ..FakeApi::default()
    };
    let mut harness = setup_view_harness(ViewKind::Attempt("PU"), api, Some(student())).await;

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Soal pertama"), "missing prompt in {html}");
    assert!(html.contains("30 : 00"), "missing timer in {html}");
    assert!(html.contains("Nomor Soal : 1 / 2"), "missing position in {html}");
    assert!(html.contains("Selanjutnya"), "missing next button in {html}");
    assert!(!html.contains("Kirim Jawaban"), "submit offered too early in {html}");
    assert_eq!(harness.api.calls(), vec!["subtests", "questions:PU"]);
}

#[tokio::test(flavor = "current_thread")]
async fn attempt_view_reports_an_empty_subtest() {
    let api = FakeApi {
        subtests: vec![subtest("PU", "Penalaran Umum")],
        ..FakeApi::default()
    };
    let mut harness = setup_view_harness(ViewKind::Attempt("PU"), api, Some(student())).await;

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Belum ada soal"), "missing empty notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_falls_back_to_offline_entries_for_guest() {
    let mut harness = setup_view_harness(ViewKind::History, FakeApi::default(), None).await;
    let entries = vec![HistoryEntry {
        batch: BATCH.to_string(),
        date: "2026-02-01".to_string(),
        subtest: "Penalaran Umum".to_string(),
        subtest_code: "PU".to_string(),
        score: 64,
        correct: 16,
        incorrect: 4,
        blank: 5,
        status: HistoryStatus::Done,
    }];
    harness
        .storage
        .local
        .set_json(OFFLINE_HISTORY_KEY, &entries)
        .await
        .expect("save offline history");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Total Subtest Selesai:"), "missing summary in {html}");
    assert!(html.contains("Penalaran Umum"), "missing row in {html}");
    assert!(html.contains("01/02/2026"), "missing date in {html}");
    assert!(html.contains("tersimpan di perangkat"), "missing offline note in {html}");
    assert!(harness.api.calls().is_empty(), "guest should not hit the backend");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_renders_dashboard_for_admin() {
    let mut api = FakeApi::default();
    api.dashboard.stats.users.total = 12;
    api.dashboard.subtest_stats.push(SubtestStat {
        code: "PU".to_string(),
        name: "Penalaran Umum".to_string(),
        question_count: 20,
        attempts: 9,
        average_score: 61.4,
    });
    let admin = Identity::new("admin", "Admin", Role::Admin);
    let mut harness = setup_view_harness(ViewKind::Admin, api, Some(admin)).await;

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Dashboard Admin"), "missing title in {html}");
    assert!(html.contains("Statistik Per Subtest"), "missing stats in {html}");
    assert!(html.contains("61.4"), "missing average in {html}");
    assert!(html.contains("Bank Soal"), "missing tab in {html}");
    assert_eq!(harness.api.calls(), vec!["dashboard:admin"]);
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Login, FakeApi::default(), None).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Username"), "missing username field in {html}");
    assert!(html.contains("Password"), "missing password field in {html}");
    assert!(html.contains("Masuk"), "missing submit in {html}");
}
