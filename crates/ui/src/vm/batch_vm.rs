use services::BatchSubtest;
use tryout_core::attempt::CompletionReason;

use crate::vm::time_fmt::format_minutes;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchSubtestVm {
    pub code: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub question_count: u32,
    pub done: bool,
}

impl From<&BatchSubtest> for BatchSubtestVm {
    fn from(item: &BatchSubtest) -> Self {
        Self {
            code: item.subtest.code.to_string(),
            title: item.subtest.title.clone(),
            description: item.subtest.description.clone(),
            duration: format_minutes(item.subtest.duration_secs()),
            question_count: item.subtest.question_count,
            done: item.done,
        }
    }
}

#[must_use]
pub fn map_batch_subtests(items: &[BatchSubtest]) -> Vec<BatchSubtestVm> {
    items.iter().map(BatchSubtestVm::from).collect()
}

/// Notice shown after returning from an attempt. `done` is the subtest id
/// and `reason` the completion tag carried in the batch page query.
#[must_use]
pub fn completion_notice(items: &[BatchSubtest], done: &str, reason: &str) -> Option<String> {
    if done.trim().is_empty() {
        return None;
    }
    let title = items
        .iter()
        .find(|item| item.subtest.id == done)
        .map_or(done, |item| item.subtest.title.as_str());
    let notice = match CompletionReason::parse(reason) {
        Some(CompletionReason::Time) => {
            format!("Waktu habis. Jawaban {title} sudah dikumpulkan otomatis.")
        }
        _ => format!("Jawaban {title} sudah dikumpulkan."),
    };
    Some(notice)
}
