use serde::{Deserialize, Serialize};

use super::ids::HasilId;

/// A scored result record as returned by the backend after submission and
/// by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hasil {
    pub id: HasilId,
    #[serde(default)]
    pub batch_id: String,
    #[serde(default)]
    pub subtest_code: String,
    #[serde(rename = "subtest_nama", default)]
    pub subtest_name: String,
    #[serde(rename = "jumlah_benar", default)]
    pub correct: u32,
    #[serde(rename = "jumlah_salah", default)]
    pub incorrect: u32,
    #[serde(rename = "jumlah_kosong", default)]
    pub blank: u32,
    #[serde(rename = "skor", default)]
    pub score: f64,
    /// ISO timestamp, kept as text because the backend may omit the offset.
    #[serde(rename = "waktu_selesai", default)]
    pub completed_at: Option<String>,
    /// `YYYY-MM-DD`; only present on history rows.
    #[serde(rename = "tanggal", default)]
    pub date: Option<String>,
}

impl Hasil {
    /// Calendar date of completion, preferring the explicit date field.
    #[must_use]
    pub fn completion_date(&self) -> Option<String> {
        self.date
            .as_deref()
            .or(self.completed_at.as_deref())
            .and_then(|raw| raw.get(..10))
            .map(str::to_string)
    }
}
