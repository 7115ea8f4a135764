use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryRowVm, HistoryVm};

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let history = ctx.history();

    let resource = use_resource(move || {
        let history = history.clone();
        async move {
            let view = history.load().await.map_err(ViewError::from)?;
            Ok(HistoryVm::from(&view))
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Riwayat Nilai" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Memuat data..." }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "stat-cards",
                        div { class: "stat-card",
                            p { class: "muted", "Total TryOut Selesai:" }
                            p { class: "stat-value", "{data.tryouts_completed}" }
                        }
                        div { class: "stat-card",
                            p { class: "muted", "Total Subtest Selesai:" }
                            p { class: "stat-value", "{data.subtests_completed}" }
                        }
                        div { class: "stat-card",
                            p { class: "muted", "Rata-rata Skor" }
                            p { class: "stat-value", "{data.mean_score}" }
                        }
                    }
                    if data.offline {
                        p { class: "notice", "Menampilkan riwayat yang tersimpan di perangkat ini." }
                    }
                    if data.rows.is_empty() {
                        p { class: "muted", "Belum ada data" }
                    } else {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Batch" }
                                    th { "Tanggal" }
                                    th { "Subtest" }
                                    th { "Benar" }
                                    th { "Salah" }
                                    th { "Kosong" }
                                    th { "Skor" }
                                    th { "Status" }
                                }
                            }
                            tbody {
                                for row in data.rows {
                                    HistoryRow { row }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "notice notice-error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn HistoryRow(row: HistoryRowVm) -> Element {
    rsx! {
        tr {
            td { "{row.batch}" }
            td { "{row.date}" }
            td { "{row.subtest} ({row.subtest_code})" }
            td { "{row.correct}" }
            td { "{row.incorrect}" }
            td { "{row.blank}" }
            td { "{row.score}" }
            td { "{row.status}" }
        }
    }
}
