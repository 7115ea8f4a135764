//! History rows shown to a student, their ordering and the summary cards.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Hasil;

/// Storage key of the offline history list.
pub const OFFLINE_HISTORY_KEY: &str = "tryout_history";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryStatus {
    #[default]
    #[serde(rename = "Selesai")]
    Done,
    #[serde(rename = "Belum")]
    Pending,
}

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub batch: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    pub subtest: String,
    pub subtest_code: String,
    #[serde(default)]
    pub score: u32,
    #[serde(rename = "jumlahBenar", default)]
    pub correct: u32,
    #[serde(rename = "jumlahSalah", default)]
    pub incorrect: u32,
    #[serde(rename = "jumlahKosong", default)]
    pub blank: u32,
    #[serde(default)]
    pub status: HistoryStatus,
}

impl HistoryEntry {
    /// Builds a row from a backend result record.
    #[must_use]
    pub fn from_hasil(hasil: &Hasil) -> Self {
        Self {
            batch: hasil.batch_id.clone(),
            date: hasil.completion_date().unwrap_or_default(),
            subtest: hasil.subtest_name.clone(),
            subtest_code: hasil.subtest_code.clone(),
            score: clamp_score(hasil.score),
            correct: hasil.correct,
            incorrect: hasil.incorrect,
            blank: hasil.blank,
            status: HistoryStatus::Done,
        }
    }

    fn parsed_date(&self) -> Option<NaiveDate> {
        self.date
            .get(..10)
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
    }
}

/// Rounds a score and clamps it to `0..=100`. NaN counts as zero.
#[must_use]
pub fn clamp_score(score: f64) -> u32 {
    if score.is_nan() {
        return 0;
    }
    // In range after clamping.
    score.clamp(0.0, 100.0).round() as u32
}

/// Newest first, then batch ascending, then subtest code ascending.
/// Rows without a readable date sort last.
pub fn sort_entries(entries: &mut [HistoryEntry]) {
    entries.sort_by(|a, b| {
        let by_date = match (a.parsed_date(), b.parsed_date()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_date
            .then_with(|| a.batch.cmp(&b.batch))
            .then_with(|| a.subtest_code.cmp(&b.subtest_code))
    });
}

/// Figures shown above the history table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistorySummary {
    /// Distinct `(batch, date)` pairs.
    pub tryouts_completed: usize,
    pub subtests_completed: usize,
    pub mean_score: u32,
}

impl HistorySummary {
    #[must_use]
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }
        let tryouts: BTreeSet<(&str, &str)> = entries
            .iter()
            .map(|entry| (entry.batch.as_str(), entry.date.as_str()))
            .collect();
        let total: f64 = entries.iter().map(|entry| f64::from(entry.score)).sum();
        Self {
            tryouts_completed: tryouts.len(),
            subtests_completed: entries.len(),
            mean_score: clamp_score(total / entries.len() as f64),
        }
    }
}
