use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::AttemptTarget;
use tracing::{debug, warn};
use tryout_core::attempt::{Attempt, AttemptError, CompletionReason, Tick};
use tryout_core::model::{BatchId, SubtestCode};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AttemptVm, NavItemVm, OptionVm};

#[component]
pub fn AttemptView(batch_id: String, subtest: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let attempts = ctx.attempts();
    let attempt = use_signal(|| None::<Attempt>);
    let warning = use_signal(|| None::<ViewError>);

    let resource = {
        let attempts = attempts.clone();
        let batch_id = batch_id.clone();
        use_resource(move || {
            let attempts = attempts.clone();
            let batch_id = batch_id.clone();
            let subtest = subtest.clone();
            let mut attempt = attempt;
            async move {
                let batch = batch_id
                    .parse::<BatchId>()
                    .map_err(|_| ViewError::Unknown)?;
                let code = subtest
                    .parse::<SubtestCode>()
                    .map_err(|_| ViewError::Unknown)?;
                let loaded = attempts.load(&batch, &code).await.map_err(ViewError::from)?;
                attempt.set(Some(loaded));
                Ok::<_, ViewError>(())
            }
        })
    };
    let state = view_state_from_resource(resource);

    let batch_for_redirect = batch_id.clone();
    use_effect(move || {
        if let Some(Err(ViewError::AlreadyCompleted)) = &*resource.value().read() {
            navigator.replace(Route::batch(batch_for_redirect.clone()));
        }
    });

    let submit = {
        let attempts = attempts.clone();
        let batch_id = batch_id.clone();
        use_callback(move |reason: CompletionReason| {
            let mut attempt = attempt;
            let mut warning = warning;
            let locked = {
                let mut guard = attempt.write();
                let Some(current) = guard.as_mut() else {
                    return;
                };
                match current.begin_submit(reason) {
                    Ok(submission) => Some((AttemptTarget::of(current), submission)),
                    Err(AttemptError::EmptyAnswers) => {
                        warning.set(Some(ViewError::EmptyAnswers));
                        None
                    }
                    Err(err) => {
                        debug!(error = %err, reason = reason.as_str(), "submit ignored");
                        None
                    }
                }
            };
            let Some((target, submission)) = locked else {
                return;
            };
            warning.set(None);

            let attempts = attempts.clone();
            let batch_id = batch_id.clone();
            spawn(async move {
                let outcome = attempts.complete(&target, submission).await;
                if let Some(current) = attempt.write().as_mut() {
                    if let Err(err) = current.finish() {
                        warn!(error = %err, "attempt could not be finished");
                    }
                }
                navigator.replace(Route::Batch {
                    batch_id,
                    done: target.subtest_id,
                    reason: outcome.reason.as_str().to_string(),
                });
            });
        })
    };

    // One tick per second until the attempt stops running.
    use_future(move || async move {
        let mut attempt = attempt;
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await;
        loop {
            interval.tick().await;
            let tick = match attempt.write().as_mut() {
                Some(current) => current.tick(),
                None => {
                    if matches!(&*resource.value().read(), Some(Err(_))) {
                        break;
                    }
                    continue;
                }
            };
            match tick {
                Tick::Running(_) => {}
                Tick::Expired => {
                    submit.call(CompletionReason::Time);
                    break;
                }
                Tick::Stopped => break,
            }
        }
    });

    let on_select = use_callback(move |value: String| {
        let mut attempt = attempt;
        let mut warning = warning;
        if let Some(current) = attempt.write().as_mut() {
            if let Err(err) = current.select_answer(&value) {
                debug!(error = %err, "answer ignored");
            }
        }
        warning.set(None);
    });
    let on_go_to = use_callback(move |index: usize| {
        let mut attempt = attempt;
        if let Some(current) = attempt.write().as_mut() {
            current.go_to(index);
        }
    });

    let on_step = use_callback(move |forward: bool| {
        let mut attempt = attempt;
        if let Some(current) = attempt.write().as_mut() {
            if forward {
                current.next();
            } else {
                current.previous();
            }
        }
    });

    let vm = attempt.read().as_ref().map(AttemptVm::from_attempt);

    rsx! {
        div { class: "page attempt",
            match (state, vm) {
                (ViewState::Ready(()), Some(vm)) => rsx! {
                    header { class: "attempt-header",
                        h2 { "{vm.title}" }
                        div { class: "timer",
                            p { class: "muted", "Sisa waktu" }
                            p { class: "timer-value", "{vm.timer}" }
                        }
                    }
                    div { class: "attempt-body",
                        section { class: "question",
                            p { class: "muted", "{vm.position}" }
                            p { class: "prompt", "{vm.prompt}" }
                            if let Some(url) = vm.image_url.clone() {
                                img { class: "question-image", src: "{url}", alt: "Gambar soal" }
                            }
                            div { class: "options",
                                for option in vm.options.clone() {
                                    OptionButton {
                                        key: "{option.key}",
                                        option,
                                        disabled: !vm.can_submit,
                                        on_select,
                                    }
                                }
                            }
                            if let Some(err) = warning() {
                                p { class: "notice notice-warning", "{err.message()}" }
                            }
                            div { class: "attempt-actions",
                                button {
                                    class: "btn btn-secondary",
                                    disabled: !vm.has_previous || !vm.can_submit,
                                    onclick: move |_| on_step.call(false),
                                    "Sebelumnya"
                                }
                                if vm.submitting {
                                    span { class: "muted", "Mengirim jawaban..." }
                                } else if vm.is_last && vm.can_submit {
                                    button {
                                        class: "btn btn-primary",
                                        onclick: move |_| submit.call(CompletionReason::Submit),
                                        "Kirim Jawaban"
                                    }
                                } else if vm.can_submit {
                                    button {
                                        class: "btn btn-secondary",
                                        onclick: move |_| on_step.call(true),
                                        "Selanjutnya"
                                    }
                                }
                            }
                        }
                        aside { class: "nav-panel",
                            h3 { "Navigasi Soal" }
                            p { class: "muted", "Pilih nomor soal · {vm.answered} / {vm.total} terjawab" }
                            div { class: "nav-grid",
                                for item in vm.nav.clone() {
                                    NavButton {
                                        key: "{item.index}",
                                        item,
                                        disabled: !vm.can_submit,
                                        on_go_to,
                                    }
                                }
                            }
                        }
                    }
                },
                (ViewState::Error(err), _) => rsx! {
                    p { class: "notice notice-error", "{err.message()}" }
                },
                _ => rsx! {
                    p { "Memuat soal..." }
                },
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, disabled: bool, on_select: Callback<String>) -> Element {
    let class = if option.selected { "option option-selected" } else { "option" };
    let value = option.key.clone();
    rsx! {
        button {
            class,
            disabled,
            onclick: move |_| on_select.call(value.clone()),
            span { class: "option-key", "{option.key}" }
            span { "{option.text}" }
        }
    }
}

#[component]
fn NavButton(item: NavItemVm, disabled: bool, on_go_to: Callback<usize>) -> Element {
    let class = match (item.current, item.answered) {
        (true, _) => "nav-item nav-current",
        (false, true) => "nav-item nav-answered",
        (false, false) => "nav-item",
    };
    rsx! {
        button {
            class,
            disabled,
            onclick: move |_| on_go_to.call(item.index),
            "{item.number}"
        }
    }
}
