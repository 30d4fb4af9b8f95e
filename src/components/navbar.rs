//! Navigation Bar Component
//!
//! Brand and sign-out control shown above the todo page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_sync::IdentityProvider;

use crate::context::SessionContext;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_context::<SessionContext>().expect("SessionContext should be provided");

    let sign_out = move |_| {
        let identity = session.identity();
        spawn_local(async move {
            // The local session is gone either way
            if let Err(e) = identity.sign_out().await {
                tracing::warn!(error = %e, "remote sign-out failed");
            }
            session.set_signed_in(false);
        });
    };

    view! {
        <nav class="navbar navbar-light bg-light">
            <div class="container">
                <span class="navbar-brand">"TaskApp"</span>
                <button class="btn btn-outline-secondary" on:click=sign_out>
                    "Sign Out"
                </button>
            </div>
        </nav>
    }
}
