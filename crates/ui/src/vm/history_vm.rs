use services::{HistorySource, HistoryView};
use tryout_core::history::{HistoryEntry, HistoryStatus};

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub batch: String,
    pub date: String,
    pub subtest: String,
    pub subtest_code: String,
    pub score: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub blank: u32,
    pub status: &'static str,
}

impl From<&HistoryEntry> for HistoryRowVm {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            batch: entry.batch.clone(),
            date: format_date(&entry.date),
            subtest: entry.subtest.clone(),
            subtest_code: entry.subtest_code.clone(),
            score: entry.score,
            correct: entry.correct,
            incorrect: entry.incorrect,
            blank: entry.blank,
            status: status_label(entry.status),
        }
    }
}

#[must_use]
pub fn status_label(status: HistoryStatus) -> &'static str {
    match status {
        HistoryStatus::Done => "Selesai",
        HistoryStatus::Pending => "Belum",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryVm {
    pub rows: Vec<HistoryRowVm>,
    pub tryouts_completed: usize,
    pub subtests_completed: usize,
    pub mean_score: u32,
    pub offline: bool,
}

impl From<&HistoryView> for HistoryVm {
    fn from(view: &HistoryView) -> Self {
        Self {
            rows: view.entries.iter().map(HistoryRowVm::from).collect(),
            tryouts_completed: view.summary.tryouts_completed,
            subtests_completed: view.summary.subtests_completed,
            mean_score: view.summary.mean_score,
            offline: view.source == HistorySource::Offline,
        }
    }
}
