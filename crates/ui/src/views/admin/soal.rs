use dioxus::prelude::*;
use tryout_core::model::{OPTION_KEYS, Pagination, SUBTEST_CODES, SoalDraft, SoalQuery, SubtestCode};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SoalRowVm, create_soal_message, subtest_label};

use super::{AdminErrorNotice, Pager, SubtestFilter, non_empty};

#[derive(Clone, Debug, PartialEq)]
struct SoalPage {
    rows: Vec<SoalRowVm>,
    pagination: Pagination,
}

#[component]
pub(super) fn SoalTab() -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let mut page = use_signal(|| 1_u32);
    let mut subtest = use_signal(String::new);
    let mut search = use_signal(String::new);

    let resource = use_resource(move || {
        let admin = admin.clone();
        let query = SoalQuery {
            page: page(),
            subtest_code: non_empty(&subtest()),
            search: non_empty(&search()),
            ..SoalQuery::default()
        };
        async move {
            let result = admin.list_soal(&query).await.map_err(ViewError::from)?;
            Ok(SoalPage {
                rows: result.results.iter().map(SoalRowVm::from).collect(),
                pagination: result.pagination,
            })
        }
    });

    let on_filter = use_callback(move |code: String| {
        subtest.set(code);
        page.set(1);
    });
    let on_page = use_callback(move |next: u32| page.set(next));
    let on_created = use_callback(move |()| {
        let mut resource = resource;
        resource.restart();
    });

    rsx! {
        h3 { "Bank Soal" }
        div { class: "filters",
            SubtestFilter { value: subtest(), on_change: on_filter }
            input {
                r#type: "search",
                placeholder: "Cari pertanyaan",
                value: "{search}",
                oninput: move |evt| {
                    search.set(evt.value());
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
                                th { "ID" }
                                th { "Subtest" }
                                th { "Pertanyaan" }
                                th { "Pilihan Jawaban" }
                                th { "Kunci" }
                                th { "Gambar" }
                            }
                        }
                        tbody {
                            for row in data.rows {
                                tr { key: "{row.id}",
                                    td { "{row.id}" }
                                    td { "{row.subtest}" }
                                    td { "{row.text}" }
                                    td {
                                        for line in row.options.iter() {
                                            div { "{line}" }
                                        }
                                    }
                                    td { "{row.key}" }
                                    td { if row.has_image { "Ya" } else { "-" } }
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
        CreateSoalForm { on_created }
    }
}

#[component]
fn CreateSoalForm(on_created: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let mut subtest = use_signal(|| SUBTEST_CODES[0].to_string());
    let mut prompt = use_signal(String::new);
    let mut options = use_signal(|| vec![String::new(); OPTION_KEYS.len()]);
    let mut answer_key = use_signal(|| None::<char>);
    let mut message = use_signal(|| None::<(bool, String)>);
    let mut saving = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let draft = SoalDraft {
            subtest: SubtestCode::new(&subtest()),
            prompt: prompt(),
            options: options(),
            answer_key: answer_key(),
        };
        let admin = admin.clone();
        spawn(async move {
            saving.set(true);
            match admin.create_soal(&draft).await {
                Ok(_) => {
                    message.set(Some((true, "Soal berhasil ditambahkan.".to_string())));
                    prompt.set(String::new());
                    options.set(vec![String::new(); OPTION_KEYS.len()]);
                    answer_key.set(None);
                    on_created.call(());
                }
                Err(err) => message.set(Some((false, create_soal_message(&err)))),
            }
            saving.set(false);
        });
    };

    rsx! {
        form { class: "form card", onsubmit: on_submit,
            h3 { "Tambah Soal Baru" }
            label { "Subtest" }
            select {
                value: "{subtest}",
                onchange: move |evt| subtest.set(evt.value()),
                for code in SUBTEST_CODES {
                    option { value: code, selected: subtest() == code, "{subtest_label(code)}" }
                }
            }
            label { "Pertanyaan" }
            textarea {
                value: "{prompt}",
                oninput: move |evt| prompt.set(evt.value()),
            }
            label { "Pilihan Jawaban" }
            for (index, key) in OPTION_KEYS.into_iter().enumerate() {
                div { class: "option-input", key: "{key}",
                    span { class: "option-key", "{key}" }
                    input {
                        r#type: "text",
                        value: options.read()[index].clone(),
                        oninput: move |evt| options.write()[index] = evt.value(),
                    }
                }
            }
            label { "Pilih Kunci Jawaban" }
            select {
                onchange: move |evt| answer_key.set(evt.value().chars().next()),
                option { value: "", selected: answer_key().is_none(), "-" }
                for key in OPTION_KEYS {
                    option { value: "{key}", selected: answer_key() == Some(key), "{key}" }
                }
            }
            if let Some((ok, text)) = message() {
                p { class: if ok { "notice notice-success" } else { "notice notice-error" }, "{text}" }
            }
            button { class: "btn btn-primary", r#type: "submit", disabled: saving(), "Simpan" }
        }
    }
}
