mod dashboard;
mod hasil;
mod soal;
mod users;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tryout_core::model::{Pagination, SUBTEST_CODES};

use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{AdminTab, pagination_label, subtest_label};

use dashboard::DashboardTab;
use hasil::HasilTab;
use soal::SoalTab;
use users::UsersTab;

#[component]
pub fn AdminView() -> Element {
    let mut tab = use_signal(AdminTab::default);
    let active = tab();

    rsx! {
        div { class: "page",
            h2 { "Dashboard Admin" }
            nav { class: "tabs",
                for item in AdminTab::ALL {
                    button {
                        class: if item == active { "tab tab-active" } else { "tab" },
                        onclick: move |_| tab.set(item),
                        "{item.label()}"
                    }
                }
            }
            match active {
                AdminTab::Dashboard => rsx! { DashboardTab {} },
                AdminTab::Soal => rsx! { SoalTab {} },
                AdminTab::Users => rsx! { UsersTab {} },
                AdminTab::Hasil => rsx! { HasilTab {} },
            }
        }
    }
}

/// Shows an admin load error and leaves the page when the session or role
/// does not allow admin access.
#[component]
fn AdminErrorNotice(error: ViewError) -> Element {
    let navigator = use_navigator();
    use_effect(move || match error {
        ViewError::SessionInvalid => {
            navigator.replace(Route::login_from("/admin"));
        }
        ViewError::Forbidden => {
            navigator.replace(Route::Tryout {});
        }
        _ => {}
    });

    let title = if error == ViewError::Forbidden {
        "Akses Ditolak"
    } else {
        "Gagal memuat data"
    };
    rsx! {
        div { class: "notice notice-error",
            h3 { "{title}" }
            p { "{error.message()}" }
        }
    }
}

/// Subtest dropdown shared by the listing filters. An empty value means all.
#[component]
fn SubtestFilter(value: String, on_change: Callback<String>) -> Element {
    rsx! {
        select {
            value: "{value}",
            onchange: move |evt| on_change.call(evt.value()),
            option { value: "", "Semua Subtest" }
            for code in SUBTEST_CODES {
                option { value: code, selected: value == code, "{subtest_label(code)}" }
            }
        }
    }
}

#[component]
fn Pager(pagination: Pagination, on_page: Callback<u32>) -> Element {
    let page = pagination.page;
    rsx! {
        div { class: "pager",
            button {
                class: "btn btn-secondary",
                disabled: !pagination.has_prev,
                onclick: move |_| on_page.call(page.saturating_sub(1).max(1)),
                "Sebelumnya"
            }
            span { class: "muted", "{pagination_label(&pagination)}" }
            button {
                class: "btn btn-secondary",
                disabled: !pagination.has_next,
                onclick: move |_| on_page.call(page + 1),
                "Selanjutnya"
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
