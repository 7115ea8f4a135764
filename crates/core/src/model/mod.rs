pub mod admin;
mod hasil;
mod identity;
mod ids;
mod progress;
mod question;
mod subtest;

pub use admin::{
    AdminHasil, AdminSoal, AdminUser, DEFAULT_PAGE_LIMIT, Dashboard, DashboardStats, HasilQuery,
    OPTION_KEYS, Page, Pagination, SUBTEST_CODES, SoalDraft, SoalDraftError, SoalQuery,
    SubtestStat, TopUser, ValidSoal,
};
pub use hasil::Hasil;
pub use identity::{GUEST_USERNAME, Identity, Role};
pub use ids::{BatchId, HasilId, ParseIdError, SoalId, SubtestCode};
pub use progress::{ProgressMarker, progress_key};
pub use question::{Question, QuestionOption, resolve_question};
pub use subtest::{DEFAULT_DURATION_MINUTES, Subtest};
