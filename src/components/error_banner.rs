//! Error Banner Component
//!
//! Shows the last failed call, worded by error kind. Each error dismisses
//! itself after a while unless a newer one replaced it.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::presentation::{banner_message, BANNER_TIMEOUT_MS};
use crate::store::AppStateStoreFields;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = ctx.store;

    Effect::new(move |_| {
        let seq = store.error_seq().get();
        if store.last_error().with(Option::is_some) {
            spawn_local(async move {
                TimeoutFuture::new(BANNER_TIMEOUT_MS).await;
                ctx.dismiss_error_if(seq);
            });
        }
    });

    move || {
        store.last_error().get().map(|err| {
            view! {
                <div class="alert alert-warning d-flex justify-content-between" role="alert">
                    <span>{banner_message(&err)}</span>
                    <button
                        type="button"
                        class="btn-close"
                        aria-label="Close"
                        on:click=move |_| ctx.dismiss_error()
                    ></button>
                </div>
            }
        })
    }
}
