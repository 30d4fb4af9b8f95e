//! Todo List Component
//!
//! One row per todo in service order, or the empty-state message.

use leptos::prelude::*;

use crate::components::TodoRow;
use crate::context::AppContext;
use crate::presentation::EMPTY_STATE;
use crate::store::AppStateStoreFields;

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = ctx.store;

    view! {
        <div class="list-group">
            <For
                each=move || store.todos().get()
                key=|todo| {
                    // Every displayed field, so a reload that changes one re-renders the row
                    (
                        todo.id.clone(),
                        todo.name.clone(),
                        todo.description.clone(),
                        todo.completed,
                        todo.user_email.clone(),
                    )
                }
                children=move |todo| view! { <TodoRow todo=todo /> }
            />
        </div>

        <Show when=move || store.todos().with(|todos| todos.is_empty())>
            <div class="text-center text-muted my-5">
                <p>{EMPTY_STATE}</p>
            </div>
        </Show>
    }
}
