//! New Todo Form Component
//!
//! Name and optional description for a new todo. The field values live in
//! the synchronization view so a failed submission keeps them.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::AppStateStoreFields;

#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = ctx.store;

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.create();
    };

    view! {
        <form class="mb-4" on:submit=create_todo>
            <div class="mb-3">
                <input
                    type="text"
                    class="form-control"
                    placeholder="What needs to be done?"
                    prop:value=move || store.pending_name().get()
                    on:input=move |ev| ctx.set_pending_name(event_target_value(&ev))
                />
            </div>
            <div class="input-group">
                <input
                    type="text"
                    class="form-control"
                    placeholder="Add description (optional)"
                    prop:value=move || store.pending_description().get()
                    on:input=move |ev| ctx.set_pending_description(event_target_value(&ev))
                />
                <button type="submit" class="btn btn-primary">"Add Todo"</button>
            </div>
        </form>
    }
}
