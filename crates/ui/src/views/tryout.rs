use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn TryoutView() -> Element {
    let ctx = use_context::<AppContext>();
    let batches = ctx.batches().to_vec();

    rsx! {
        div { class: "page",
            h2 { "Tryout" }
            if batches.is_empty() {
                p { class: "muted", "Belum ada batch tryout." }
            } else {
                ul { class: "card-list",
                    for batch in batches {
                        li { class: "card",
                            h3 { "{batch}" }
                            Link { to: Route::batch(batch.as_str()), "Kerjakan" }
                        }
                    }
                }
            }
        }
    }
}
