//! Alert Stack Component
//!
//! Dismissible client-side alerts. Each alert also closes itself after
//! the configured timeout (see `AppContext::push_alert`).

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn AlertStack() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="alert-stack">
            <For
                each=move || ctx.alerts.get()
                key=|alert| alert.id
                children=move |alert| {
                    let id = alert.id;
                    view! {
                        <div class=alert.level.css_class() role="alert">
                            {alert.message}
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                on:click=move |_| ctx.dismiss_alert(id)
                            ></button>
                        </div>
                    }
                }
            />
        </div>
    }
}
