use services::AdminError;
use tryout_core::model::{AdminHasil, AdminSoal, AdminUser, Pagination, SoalDraftError};

use crate::vm::time_fmt::{format_date, format_score};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Dashboard,
    Soal,
    Users,
    Hasil,
}

impl AdminTab {
    pub const ALL: [AdminTab; 4] = [
        AdminTab::Dashboard,
        AdminTab::Soal,
        AdminTab::Users,
        AdminTab::Hasil,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AdminTab::Dashboard => "Dashboard",
            AdminTab::Soal => "Bank Soal",
            AdminTab::Users => "Daftar Pengguna",
            AdminTab::Hasil => "Hasil Tryout",
        }
    }
}

/// Label for a subtest filter choice.
#[must_use]
pub fn subtest_label(code: &str) -> String {
    let name = match code {
        "PU" => "Penalaran Umum",
        "PPU" => "Pengetahuan & Pemahaman Umum",
        "PBM" => "Pemahaman Bacaan & Menulis",
        "PK" => "Pengetahuan Kuantitatif",
        "LBI" => "Literasi Bahasa Indonesia",
        "LBE" => "Literasi Bahasa Inggris",
        "PM" => "Penalaran Matematika",
        other => return other.to_string(),
    };
    format!("{name} ({code})")
}

/// `Menampilkan 1-50 dari 120`, or a no-data line.
#[must_use]
pub fn pagination_label(pagination: &Pagination) -> String {
    match pagination.row_range() {
        Some((start, end)) => format!(
            "Menampilkan {start}-{end} dari {} (halaman {} / {})",
            pagination.total,
            pagination.page,
            pagination.total_pages.max(1)
        ),
        None => "Belum ada data".to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoalRowVm {
    pub id: u64,
    pub subtest: String,
    pub text: String,
    pub options: Vec<String>,
    pub key: String,
    pub has_image: bool,
}

impl From<&AdminSoal> for SoalRowVm {
    fn from(soal: &AdminSoal) -> Self {
        Self {
            id: soal.id,
            subtest: soal.subtest_code.clone(),
            text: soal.text.clone(),
            options: soal
                .options()
                .into_iter()
                .map(|(key, text)| format!("{key}. {text}"))
                .collect(),
            key: soal.correct_answer.clone(),
            has_image: soal.has_image || soal.image_url.is_some(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRowVm {
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    pub results: u64,
    pub average: String,
}

impl From<&AdminUser> for UserRowVm {
    fn from(user: &AdminUser) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: if user.is_staff { "Admin" } else { "Siswa" },
            results: user.result_count,
            average: format_score(user.average_score),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HasilRowVm {
    pub username: String,
    pub subtest: String,
    pub batch: String,
    pub counts: String,
    pub score: String,
    pub date: String,
}

impl From<&AdminHasil> for HasilRowVm {
    fn from(hasil: &AdminHasil) -> Self {
        Self {
            username: hasil.username.clone(),
            subtest: hasil.subtest_code.clone(),
            batch: hasil.batch_id.clone(),
            counts: format!("{} / {} / {}", hasil.correct, hasil.incorrect, hasil.blank),
            score: format_score(hasil.score),
            date: hasil
                .completed_at
                .as_deref()
                .map_or_else(|| "-".to_string(), format_date),
        }
    }
}

/// Inline message for a rejected question form.
#[must_use]
pub fn create_soal_message(err: &AdminError) -> String {
    match err {
        AdminError::Draft(SoalDraftError::EmptyPrompt) => "Pertanyaan wajib diisi.".to_string(),
        AdminError::Draft(SoalDraftError::TooFewOptions) => {
            "Isi minimal dua pilihan jawaban.".to_string()
        }
        AdminError::Draft(SoalDraftError::InvalidAnswerKey) => {
            "Pilih kunci jawaban dari pilihan yang terisi.".to_string()
        }
        AdminError::Api(err) => err.user_message(),
        other => other.to_string(),
    }
}
