use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::{AuthError, landing_path};
use tracing::debug;

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;

fn login_message(err: &AuthError) -> String {
    match err {
        AuthError::MissingCredentials | AuthError::InvalidCredentials(_) => err.to_string(),
        AuthError::Api(err) => err.user_message(),
        _ => "Terjadi kesalahan. Silakan coba lagi.".to_string(),
    }
}

#[component]
pub fn LoginView(from: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let current = try_use_context::<CurrentUser>();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let session = {
        let auth = ctx.auth();
        use_resource(move || {
            let auth = auth.clone();
            async move { auth.check_session().await.ok().flatten() }
        })
    };
    let signed_in_as = session
        .value()
        .read()
        .as_ref()
        .and_then(|identity| identity.as_ref().map(|identity| identity.username.clone()));

    let on_submit = {
        let auth = ctx.auth();
        move |evt: FormEvent| {
            evt.prevent_default();
            if busy() {
                return;
            }
            let auth = auth.clone();
            let from = from.clone();
            let name = username();
            let secret = password();
            spawn(async move {
                busy.set(true);
                error.set(None);
                match auth.login(&name, &secret).await {
                    Ok(identity) => {
                        let target = landing_path(identity.role, Some(from.as_str()));
                        debug!(target = %target, "login succeeded");
                        if let Some(current) = current {
                            current.set(identity);
                        }
                        let route = target.parse::<Route>().unwrap_or(Route::Tryout {});
                        navigator.push(route);
                    }
                    Err(err) => {
                        error.set(Some(login_message(&err)));
                    }
                }
                busy.set(false);
            });
        }
    };

    rsx! {
        div { class: "page page-narrow",
            h2 { "Masuk" }
            if let Some(name) = signed_in_as {
                p { class: "notice", "Anda sudah masuk sebagai {name}." }
            }
            form { class: "form", onsubmit: on_submit,
                label { r#for: "username", "Username" }
                input {
                    id: "username",
                    r#type: "text",
                    autocomplete: "username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "notice notice-error", "{message}" }
                }
                button { class: "btn btn-primary", r#type: "submit", disabled: busy(),
                    if busy() { "Memproses..." } else { "Masuk" }
                }
            }
        }
    }
}
