use dioxus::prelude::*;
use tryout_core::model::Dashboard;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::format_score;

use super::AdminErrorNotice;

#[component]
pub(super) fn DashboardTab() -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let resource = use_resource(move || {
        let admin = admin.clone();
        async move { admin.dashboard().await.map_err(ViewError::from) }
    });

    match view_state_from_resource(resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { "Memuat data..." }
        },
        ViewState::Ready(dashboard) => rsx! {
            DashboardContent { dashboard }
        },
        ViewState::Error(error) => rsx! {
            AdminErrorNotice { error }
        },
    }
}

#[component]
fn DashboardContent(dashboard: Dashboard) -> Element {
    let stats = dashboard.stats.clone();
    let average = format_score(stats.results.average_score);

    rsx! {
        div { class: "stat-cards",
            div { class: "stat-card",
                p { class: "muted", "Pengguna" }
                p { class: "stat-value", "{stats.users.total}" }
                p { class: "muted", "{stats.users.students} siswa · {stats.users.admins} admin" }
            }
            div { class: "stat-card",
                p { class: "muted", "Subtest" }
                p { class: "stat-value", "{stats.subtests.total}" }
                p { class: "muted", "{stats.subtests.total_questions} soal" }
            }
            div { class: "stat-card",
                p { class: "muted", "Hasil Tryout" }
                p { class: "stat-value", "{stats.results.total}" }
                p { class: "muted", "{stats.results.scored} dengan skor" }
            }
            div { class: "stat-card",
                p { class: "muted", "Rata-rata Skor" }
                p { class: "stat-value", "{average}" }
            }
        }

        h3 { "Statistik Per Subtest" }
        if dashboard.subtest_stats.is_empty() {
            p { class: "muted", "Belum ada data" }
        } else {
            table { class: "table",
                thead {
                    tr {
                        th { "Subtest" }
                        th { "Soal" }
                        th { "Pengerjaan" }
                        th { "Rata-rata Skor" }
                    }
                }
                tbody {
                    for stat in dashboard.subtest_stats.iter().cloned() {
                        tr { key: "{stat.code}",
                            td { "{stat.name} ({stat.code})" }
                            td { "{stat.question_count}" }
                            td { "{stat.attempts}" }
                            td { "{format_score(stat.average_score)}" }
                        }
                    }
                }
            }
        }

        h3 { "Top 10 Pengguna" }
        if dashboard.top_users.is_empty() {
            p { class: "muted", "Belum ada data" }
        } else {
            ol { class: "top-users",
                for user in dashboard.top_users.iter().take(10).cloned() {
                    li { key: "{user.username}",
                        span { "{user.name} (@{user.username})" }
                        span { class: "muted", " · {format_score(user.average_score)} · {user.attempts} pengerjaan" }
                    }
                }
            }
        }
    }
}
