//! Administrative read models and the question-bank draft.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::SubtestCode;

/// Default page size for admin listings.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Subtest codes offered as admin filters.
pub const SUBTEST_CODES: [&str; 7] = ["PU", "PPU", "PBM", "PK", "LBI", "LBE", "PM"];

/// Option letters in display order.
pub const OPTION_KEYS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

// ─── Dashboard ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub subtest_stats: Vec<SubtestStat>,
    #[serde(default)]
    pub top_users: Vec<TopUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub users: UserCounts,
    #[serde(default)]
    pub subtests: SubtestCounts,
    #[serde(rename = "hasil_tryout", default)]
    pub results: ResultCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub students: u64,
    #[serde(default)]
    pub admins: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtestCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "total_soal", default)]
    pub total_questions: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "dengan_skor", default)]
    pub scored: u64,
    #[serde(rename = "avg_skor", default)]
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtestStat {
    pub code: String,
    #[serde(rename = "nama", default)]
    pub name: String,
    #[serde(rename = "jumlah_soal", default)]
    pub question_count: u64,
    #[serde(rename = "total_pengerjaan", default)]
    pub attempts: u64,
    #[serde(rename = "avg_skor", default)]
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUser {
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "avg_skor", default)]
    pub average_score: f64,
    #[serde(rename = "total_pengerjaan", default)]
    pub attempts: u64,
}

// ─── Listings ──────────────────────────────────────────────────────────────────

/// A question-bank row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSoal {
    pub id: u64,
    #[serde(default)]
    pub subtest_code: String,
    #[serde(rename = "subtest_nama", default)]
    pub subtest_name: String,
    #[serde(rename = "soal_text", default)]
    pub text: String,
    #[serde(rename = "soal_image", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub option_a: Option<String>,
    #[serde(default)]
    pub option_b: Option<String>,
    #[serde(default)]
    pub option_c: Option<String>,
    #[serde(default)]
    pub option_d: Option<String>,
    #[serde(default)]
    pub option_e: Option<String>,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AdminSoal {
    /// Non-empty options paired with their letter.
    #[must_use]
    pub fn options(&self) -> Vec<(char, &str)> {
        [
            &self.option_a,
            &self.option_b,
            &self.option_c,
            &self.option_d,
            &self.option_e,
        ]
        .into_iter()
        .zip(OPTION_KEYS)
        .filter_map(|(text, key)| {
            text.as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| (key, t))
        })
        .collect()
    }
}

/// A registered user with aggregate results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(rename = "total_hasil", default)]
    pub result_count: u64,
    #[serde(rename = "avg_skor", default)]
    pub average_score: f64,
}

/// A result record across all users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminHasil {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub subtest_code: String,
    #[serde(rename = "subtest_nama", default)]
    pub subtest_name: String,
    #[serde(default)]
    pub batch_id: String,
    #[serde(rename = "jumlah_benar", default)]
    pub correct: u32,
    #[serde(rename = "jumlah_salah", default)]
    pub incorrect: u32,
    #[serde(rename = "jumlah_kosong", default)]
    pub blank: u32,
    #[serde(rename = "skor", default)]
    pub score: f64,
    #[serde(rename = "waktu_selesai", default)]
    pub completed_at: Option<String>,
    #[serde(rename = "durasi_detik", default)]
    pub duration_secs: Option<u64>,
}

fn default_true() -> bool {
    true
}

// ─── Pagination ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Pagination for a response that returned everything in one page.
    #[must_use]
    pub fn single_page(page: u32, limit: u32, returned: usize) -> Self {
        Self {
            page,
            limit,
            total: returned as u64,
            total_pages: 1,
            has_next: false,
            has_prev: page > 1,
        }
    }

    /// One-based inclusive row range shown on this page, `None` when empty.
    #[must_use]
    pub fn row_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let start = u64::from(self.page.saturating_sub(1)) * u64::from(self.limit) + 1;
        let end = (start + u64::from(self.limit) - 1).min(self.total);
        (start <= end).then_some((start, end))
    }
}

/// One page of an admin listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub pagination: Pagination,
}

/// Filters for the question-bank listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoalQuery {
    pub page: u32,
    pub limit: u32,
    pub subtest_code: Option<String>,
    pub search: Option<String>,
}

impl Default for SoalQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            subtest_code: None,
            search: None,
        }
    }
}

/// Filters for the results listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasilQuery {
    pub page: u32,
    pub limit: u32,
    pub username: Option<String>,
    pub subtest_code: Option<String>,
}

impl Default for HasilQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            username: None,
            subtest_code: None,
        }
    }
}

// ─── Question draft ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SoalDraftError {
    #[error("question text is required")]
    EmptyPrompt,
    #[error("at least two options are required")]
    TooFewOptions,
    #[error("the answer key must be one of the filled options")]
    InvalidAnswerKey,
}

/// A new question as typed into the admin form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoalDraft {
    pub subtest: SubtestCode,
    pub prompt: String,
    /// Option texts in A..E order; blanks are skipped.
    pub options: Vec<String>,
    pub answer_key: Option<char>,
}

/// A draft that passed validation, ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSoal {
    pub subtest: SubtestCode,
    pub prompt: String,
    pub options: Vec<(char, String)>,
    pub answer_key: char,
}

impl SoalDraft {
    /// Checks the draft.
    ///
    /// # Errors
    ///
    /// Returns `SoalDraftError` when the prompt is blank, fewer than two
    /// options are filled, or the answer key is not a filled option.
    pub fn validate(&self) -> Result<ValidSoal, SoalDraftError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(SoalDraftError::EmptyPrompt);
        }
        let options: Vec<(char, String)> = OPTION_KEYS
            .into_iter()
            .zip(&self.options)
            .filter_map(|(key, text)| {
                let text = text.trim();
                (!text.is_empty()).then(|| (key, text.to_string()))
            })
            .collect();
        if options.len() < 2 {
            return Err(SoalDraftError::TooFewOptions);
        }
        let answer_key = self
            .answer_key
            .map(|key| key.to_ascii_uppercase())
            .filter(|key| options.iter().any(|(k, _)| k == key))
            .ok_or(SoalDraftError::InvalidAnswerKey)?;
        Ok(ValidSoal {
            subtest: self.subtest.clone(),
            prompt: prompt.to_string(),
            options,
            answer_key,
        })
    }
}

impl ValidSoal {
    /// Options in the `A. text|B. text` form the question bank stores.
    #[must_use]
    pub fn options_text(&self) -> String {
        self.options
            .iter()
            .map(|(key, text)| format!("{key}. {text}"))
            .collect::<Vec<_>>()
            .join("|")
    }
}
