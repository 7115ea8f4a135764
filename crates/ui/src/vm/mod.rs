mod admin_vm;
mod attempt_vm;
mod batch_vm;
mod history_vm;
mod time_fmt;

pub use admin_vm::{
    AdminTab, HasilRowVm, SoalRowVm, UserRowVm, create_soal_message, pagination_label,
    subtest_label,
};
pub use attempt_vm::{AttemptVm, NavItemVm, OptionVm};
pub use batch_vm::{BatchSubtestVm, completion_notice, map_batch_subtests};
pub use history_vm::{HistoryRowVm, HistoryVm, status_label};
pub use time_fmt::{format_countdown, format_date, format_minutes, format_score};
