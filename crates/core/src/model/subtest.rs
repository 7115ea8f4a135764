use serde::{Deserialize, Serialize};

use super::ids::SubtestCode;

/// Duration used when the backend does not provide one.
pub const DEFAULT_DURATION_MINUTES: f64 = 30.0;

/// A timed section of a tryout, as listed by `GET /subtests/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtest {
    pub id: String,
    pub code: SubtestCode,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Minutes; may be fractional.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(rename = "questionCount", default)]
    pub question_count: u32,
}

impl Subtest {
    /// Total countdown for the subtest in whole seconds.
    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        let minutes = match self.duration {
            Some(m) if m.is_finite() && m >= 0.0 => m,
            _ => DEFAULT_DURATION_MINUTES,
        };
        // Saturating float-to-int cast.
        (minutes * 60.0).round() as u32
    }
}
