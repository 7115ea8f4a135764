use dioxus::prelude::*;
use dioxus_router::Link;
use tryout_core::model::BatchId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{BatchSubtestVm, completion_notice, map_batch_subtests};

#[derive(Clone, Debug, PartialEq)]
struct BatchData {
    subtests: Vec<BatchSubtestVm>,
    notice: Option<String>,
}

#[component]
pub fn BatchView(batch_id: String, done: String, reason: String) -> Element {
    let ctx = use_context::<AppContext>();
    let attempts = ctx.attempts();
    let batch_for_resource = batch_id.clone();
    let resource = use_resource(move || {
        let attempts = attempts.clone();
        let batch_id = batch_for_resource.clone();
        let done = done.clone();
        let reason = reason.clone();
        async move {
            let batch = batch_id
                .parse::<BatchId>()
                .map_err(|_| ViewError::Unknown)?;
            let items = attempts
                .batch_subtests(&batch)
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(BatchData {
                subtests: map_batch_subtests(&items),
                notice: completion_notice(&items, &done, &reason),
            })
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Batch {batch_id}" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Memuat data..." }
                },
                ViewState::Ready(data) => rsx! {
                    if let Some(notice) = data.notice {
                        p { class: "notice notice-success", "{notice}" }
                    }
                    if data.subtests.is_empty() {
                        p { class: "muted", "Belum ada subtest yang tersedia." }
                    }
                    ul { class: "card-list",
                        for item in data.subtests {
                            li { class: if item.done { "card card-done" } else { "card" },
                                h3 { "{item.title}" }
                                p { class: "muted", "{item.code} · {item.question_count} soal · {item.duration}" }
                                if !item.description.is_empty() {
                                    p { "{item.description}" }
                                }
                                if item.done {
                                    span { class: "badge", "Selesai" }
                                } else {
                                    Link {
                                        to: Route::Attempt {
                                            batch_id: batch_id.clone(),
                                            subtest: item.code.clone(),
                                        },
                                        "Mulai"
                                    }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "notice notice-error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Coba lagi"
                    }
                },
            }
        }
    }
}
