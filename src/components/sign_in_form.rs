//! Sign-In Form Component
//!
//! Shown while there is no session. Signing in opens the todo page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::SessionContext;
use crate::presentation::sign_in_message;

#[component]
pub fn SignInForm() -> impl IntoView {
    let session = use_context::<SessionContext>().expect("SessionContext should be provided");

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    let sign_in = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let user = username.get_untracked().trim().to_string();
        let pass = password.get_untracked();
        if user.is_empty() || pass.is_empty() {
            set_error.set(Some("Enter your email and password.".to_string()));
            return;
        }

        set_busy.set(true);
        let identity = session.identity();
        spawn_local(async move {
            let result = identity.sign_in(&user, &pass).await;
            set_busy.set(false);
            match result {
                Ok(()) => {
                    set_error.set(None);
                    set_password.set(String::new());
                    session.set_signed_in(true);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "sign-in failed");
                    set_error.set(Some(sign_in_message(&e)));
                }
            }
        });
    };

    view! {
        <div class="container py-5">
            <div class="row justify-content-center">
                <div class="col-md-5">
                    <h1 class="text-center mb-4">"TaskApp"</h1>
                    <form on:submit=sign_in>
                        <div class="mb-3">
                            <input
                                type="email"
                                class="form-control"
                                placeholder="Email"
                                autocomplete="username"
                                prop:value=move || username.get()
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="mb-3">
                            <input
                                type="password"
                                class="form-control"
                                placeholder="Password"
                                autocomplete="current-password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                            />
                        </div>
                        {move || error.get().map(|msg| view! {
                            <div class="alert alert-danger py-2">{msg}</div>
                        })}
                        <button type="submit" class="btn btn-primary w-100" disabled=move || busy.get()>
                            {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
