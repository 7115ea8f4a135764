use dioxus::prelude::*;
use tryout_core::model::{HasilQuery, Pagination};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::HasilRowVm;

use super::{AdminErrorNotice, Pager, SubtestFilter, non_empty};

#[derive(Clone, Debug, PartialEq)]
struct HasilPage {
    rows: Vec<HasilRowVm>,
    pagination: Pagination,
}

#[component]
pub(super) fn HasilTab() -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let mut page = use_signal(|| 1_u32);
    let mut subtest = use_signal(String::new);
    let mut username = use_signal(String::new);

    let resource = use_resource(move || {
        let admin = admin.clone();
        let query = HasilQuery {
            page: page(),
            username: non_empty(&username()),
            subtest_code: non_empty(&subtest()),
            ..HasilQuery::default()
        };
        async move {
            let result = admin.list_hasil(&query).await.map_err(ViewError::from)?;
            Ok(HasilPage {
                rows: result.results.iter().map(HasilRowVm::from).collect(),
                pagination: result.pagination,
            })
        }
    });

    let on_filter = use_callback(move |code: String| {
        subtest.set(code);
        page.set(1);
    });
    let on_page = use_callback(move |next: u32| page.set(next));

    rsx! {
        h3 { "Hasil Tryout" }
        div { class: "filters",
            SubtestFilter { value: subtest(), on_change: on_filter }
            input {
                r#type: "search",
                placeholder: "Username",
                value: "{username}",
                oninput: move |evt| {
                    username.set(evt.value());
                    page.set(1);
                },
            }
        }
        match view_state_from_resource(resource) {
            ViewState::Idle | ViewState::Loading => rsx! {
                p { "Memuat data..." }
            },
            ViewState::Ready(data) => rsx! {
                if data.rows.is_empty() {
                    p { class: "muted", "Belum ada data" }
                } else {
                    table { class: "table",
                        thead {
                            tr {
                                th { "Username" }
                                th { "Subtest" }
                                th { "Batch" }
                                th { "B / S / K" }
                                th { "Skor" }
                                th { "Tanggal" }
                            }
                        }
                        tbody {
                            for row in data.rows {
                                tr {
                                    td { "{row.username}" }
                                    td { "{row.subtest}" }
                                    td { "{row.batch}" }
                                    td { "{row.counts}" }
                                    td { "{row.score}" }
                                    td { "{row.date}" }
                                }
                            }
                        }
                    }
                }
                Pager { pagination: data.pagination, on_page }
            },
            ViewState::Error(error) => rsx! {
                AdminErrorNotice { error }
            },
        }
    }
}
