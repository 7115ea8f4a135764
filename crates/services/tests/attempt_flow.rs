mod common;

use std::sync::Arc;

use common::{FakeApi, app_services, question, sign_in, student};
use services::attempts::Delivery;
use services::error::AttemptServiceError;
use services::history::HistorySource;
use storage::repository::LocalStoreExt;
use tryout_core::attempt::{AttemptError, AttemptPhase, CompletionReason, Tick};
use tryout_core::history::{HistoryEntry, OFFLINE_HISTORY_KEY};
use tryout_core::model::{BatchId, SubtestCode};
use tryout_core::time::fixed_clock;

fn three_questions() -> Vec<tryout_core::model::Question> {
    vec![question("pu-1", Some(101)), question("pu-2", Some(102)), question("pu-3", None)]
}

#[tokio::test]
async fn submit_on_last_question_sends_two_answers() {
    let api = Arc::new(FakeApi::with_subtest(three_questions()));
    let clock = fixed_clock();
    let (services, storage) = app_services(Arc::clone(&api), clock);
    sign_in(&storage, &student(), clock).await;
    let attempts = services.attempts();
    let batch = BatchId::new("batch-1");
    let code = SubtestCode::new("PU");

    let mut attempt = attempts.load(&batch, &code).await.expect("load");
    assert_eq!(attempt.phase(), AttemptPhase::InProgress);
    assert_eq!(attempt.total_secs(), 1800);

    attempt.select_answer("a").unwrap();
    attempt.go_to(2);
    attempt.select_answer("C").unwrap();
    for _ in 0..120 {
        attempt.tick();
    }

    let outcome = attempts
        .submit(&mut attempt, CompletionReason::Submit)
        .await
        .expect("submit");
    assert_eq!(attempt.phase(), AttemptPhase::Done);
    assert_eq!(attempt.completion(), Some(CompletionReason::Submit));
    assert!(matches!(outcome.delivery, Delivery::Sent(_)));

    let sent = api.submitted();
    assert_eq!(sent.len(), 1);
    let request = &sent[0];
    assert_eq!(request.username, "budi");
    assert_eq!(request.subtest_code, "PU");
    assert_eq!(request.batch_id, "batch-1");
    assert_eq!(request.answers.len(), 2);
    assert_eq!(request.answers.get("101").map(String::as_str), Some("A"));
    assert_eq!(request.answers.get("2").map(String::as_str), Some("C"));
    assert_eq!(request.duration_secs, Some(120));

    // Re-entry is blocked once the marker is written.
    let again = attempts.load(&batch, &code).await;
    assert!(matches!(
        again,
        Err(AttemptServiceError::Attempt(AttemptError::AlreadyCompleted))
    ));
    let listed = attempts.batch_subtests(&batch).await.unwrap();
    assert!(listed[0].done);

    // The scored result is kept offline; the signed-in view still reads the backend.
    let offline: Vec<HistoryEntry> = storage
        .local
        .get_json(OFFLINE_HISTORY_KEY)
        .await
        .unwrap()
        .unwrap_or_default();
    assert_eq!(offline.len(), 1);
    assert_eq!(offline[0].score, 75);
    let view = services.history().load().await.unwrap();
    assert_eq!(view.source, HistorySource::Remote);
    assert!(view.entries.is_empty());
}

#[tokio::test]
async fn timeout_with_no_answers_finishes_without_posting() {
    let api = Arc::new(FakeApi::with_subtest(three_questions()));
    let clock = fixed_clock();
    let (services, storage) = app_services(Arc::clone(&api), clock);
    sign_in(&storage, &student(), clock).await;
    let attempts = services.attempts();

    let mut attempt = attempts
        .load(&BatchId::new("batch-1"), &SubtestCode::new("PU"))
        .await
        .unwrap();
    let mut ticks = 0;
    loop {
        ticks += 1;
        match attempt.tick() {
            Tick::Running(_) => {}
            Tick::Expired => break,
            Tick::Stopped => panic!("countdown stopped before expiring"),
        }
    }
    assert_eq!(ticks, 1800);

    let outcome = attempts
        .submit(&mut attempt, CompletionReason::Time)
        .await
        .unwrap();
    assert_eq!(outcome.reason, CompletionReason::Time);
    assert_eq!(outcome.delivery, Delivery::NothingToSend);
    assert_eq!(attempt.phase(), AttemptPhase::Done);
    assert!(api.submitted().is_empty());
    assert_eq!(attempt.tick(), Tick::Stopped);
}

#[tokio::test]
async fn empty_user_submit_keeps_attempt_open() {
    let api = Arc::new(FakeApi::with_subtest(three_questions()));
    let clock = fixed_clock();
    let (services, storage) = app_services(Arc::clone(&api), clock);
    sign_in(&storage, &student(), clock).await;
    let attempts = services.attempts();
    let batch = BatchId::new("batch-1");

    let mut attempt = attempts.load(&batch, &SubtestCode::new("PU")).await.unwrap();
    let err = attempts
        .submit(&mut attempt, CompletionReason::Submit)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AttemptServiceError::Attempt(AttemptError::EmptyAnswers)
    ));
    assert_eq!(attempt.phase(), AttemptPhase::InProgress);
    assert!(!attempts.batch_subtests(&batch).await.unwrap()[0].done);
    assert!(!api.calls().contains(&"submit".to_string()));
}

#[tokio::test]
async fn guest_attempt_is_marked_done_but_not_posted() {
    let api = Arc::new(FakeApi::with_subtest(three_questions()));
    let (services, _storage) = app_services(Arc::clone(&api), fixed_clock());
    let attempts = services.attempts();
    let batch = BatchId::new("batch-1");

    let mut attempt = attempts.load(&batch, &SubtestCode::new("PU")).await.unwrap();
    attempt.select_answer("B").unwrap();
    let outcome = attempts
        .submit(&mut attempt, CompletionReason::Submit)
        .await
        .unwrap();
    assert_eq!(outcome.delivery, Delivery::Guest);
    assert!(api.submitted().is_empty());
    assert!(attempts.batch_subtests(&batch).await.unwrap()[0].done);
}

#[tokio::test]
async fn failed_post_still_completes_attempt() {
    let mut fake = FakeApi::with_subtest(three_questions());
    fake.submit_fails = true;
    let api = Arc::new(fake);
    let clock = fixed_clock();
    let (services, storage) = app_services(Arc::clone(&api), clock);
    sign_in(&storage, &student(), clock).await;
    let attempts = services.attempts();
    let batch = BatchId::new("batch-1");

    let mut attempt = attempts.load(&batch, &SubtestCode::new("PU")).await.unwrap();
    attempt.select_answer("D").unwrap();
    let outcome = attempts
        .submit(&mut attempt, CompletionReason::Submit)
        .await
        .unwrap();
    assert_eq!(outcome.delivery, Delivery::Failed("server error".into()));
    assert_eq!(attempt.phase(), AttemptPhase::Done);
    assert_eq!(api.submitted().len(), 1);
    assert!(attempts.batch_subtests(&batch).await.unwrap()[0].done);
}

#[tokio::test]
async fn unknown_subtest_and_empty_subtest_are_reported() {
    let api = Arc::new(FakeApi::with_subtest(Vec::new()));
    let (services, _storage) = app_services(api, fixed_clock());
    let attempts = services.attempts();
    let batch = BatchId::new("batch-1");

    assert!(matches!(
        attempts.load(&batch, &SubtestCode::new("LBE")).await,
        Err(AttemptServiceError::UnknownSubtest(code)) if code == "LBE"
    ));
    assert!(matches!(
        attempts.load(&batch, &SubtestCode::new("PU")).await,
        Err(AttemptServiceError::Attempt(AttemptError::NoQuestions))
    ));
}

#[tokio::test]
async fn unreachable_subtest_list_reads_as_empty_batch() {
    let mut fake = FakeApi::with_subtest(three_questions());
    fake.subtests_fail = true;
    let api = Arc::new(fake);
    let clock = fixed_clock();
    let (services, storage) = app_services(Arc::clone(&api), clock);
    sign_in(&storage, &student(), clock).await;

    let listed = services
        .attempts()
        .batch_subtests(&BatchId::new("batch-1"))
        .await
        .expect("fetch failure is not an error");
    assert!(listed.is_empty());
    assert_eq!(api.calls(), vec!["subtests".to_string()]);
}
