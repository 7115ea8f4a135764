use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::UserRowVm;

use super::AdminErrorNotice;

#[component]
pub(super) fn UsersTab() -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let resource = use_resource(move || {
        let admin = admin.clone();
        async move {
            let users = admin.list_users().await.map_err(ViewError::from)?;
            Ok(users.iter().map(UserRowVm::from).collect::<Vec<_>>())
        }
    });

    match view_state_from_resource(resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { "Memuat data..." }
        },
        ViewState::Ready(rows) => rsx! {
            h3 { "Daftar Pengguna" }
            if rows.is_empty() {
                p { class: "muted", "Belum ada data" }
            } else {
                table { class: "table",
                    thead {
                        tr {
                            th { "Username" }
                            th { "Nama" }
                            th { "Email" }
                            th { "Role" }
                            th { "Hasil" }
                            th { "Rata-rata Skor" }
                        }
                    }
                    tbody {
                        for row in rows {
                            tr { key: "{row.username}",
                                td { "{row.username}" }
                                td { "{row.name}" }
                                td { "{row.email}" }
                                td { "{row.role}" }
                                td { "{row.results}" }
                                td { "{row.average}" }
                            }
                        }
                    }
                }
            }
        },
        ViewState::Error(error) => rsx! {
            AdminErrorNotice { error }
        },
    }
}
