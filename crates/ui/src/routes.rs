use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use tracing::warn;
use tryout_core::model::Identity;

use crate::context::{AppContext, CurrentUser};
use crate::views::{AdminView, AttemptView, BatchView, HistoryView, LoginView, TryoutView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", TryoutView)] Home {},
        #[route("/tryout", TryoutView)] Tryout {},
        #[route("/tryout/:batch_id?:done&:reason", BatchView)] Batch { batch_id: String, done: String, reason: String },
        #[route("/tryout/:batch_id/:subtest", AttemptView)] Attempt { batch_id: String, subtest: String },
        #[route("/history", HistoryView)] History {},
        #[route("/admin", AdminView)] Admin {},
        #[route("/login?:from", LoginView)] Login { from: String },
}

impl Route {
    /// Batch page without a completion notice.
    #[must_use]
    pub fn batch(batch_id: impl Into<String>) -> Self {
        Self::Batch {
            batch_id: batch_id.into(),
            done: String::new(),
            reason: String::new(),
        }
    }

    #[must_use]
    pub fn login_from(from: impl Into<String>) -> Self {
        Self::Login { from: from.into() }
    }
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let current = use_context_provider(|| CurrentUser(Signal::new(None)));
    let identity = ctx.identity();
    use_future(move || {
        let identity = identity.clone();
        async move {
            current.set(identity.identity().await);
        }
    });

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let current = use_context::<CurrentUser>();
    let user = current.0.read().clone();
    let signed_in = user.as_ref().is_some_and(|user| !user.is_guest());
    let is_admin = user.as_ref().is_some_and(Identity::is_admin);
    let display_name = user.as_ref().map_or_else(String::new, |user| {
        if user.name.trim().is_empty() {
            user.username.clone()
        } else {
            user.name.clone()
        }
    });

    let on_logout = {
        let auth = ctx.auth();
        move |_| {
            let auth = auth.clone();
            spawn(async move {
                if let Err(err) = auth.logout().await {
                    warn!(error = %err, "logout failed");
                }
                current.set(Identity::guest());
                navigator.push(Route::login_from(""));
            });
        }
    };

    rsx! {
        nav { class: "sidebar",
            h1 { "Tryout" }
            ul {
                li { Link { to: Route::Tryout {}, "Tryout" } }
                li { Link { to: Route::History {}, "Riwayat" } }
                if is_admin {
                    li { Link { to: Route::Admin {}, "Admin" } }
                }
            }
            div { class: "sidebar-user",
                if signed_in {
                    p { class: "muted", "{display_name}" }
                    button { class: "btn btn-secondary", onclick: on_logout, "Keluar" }
                } else {
                    Link { to: Route::login_from(""), "Masuk" }
                }
            }
        }
    }
}
