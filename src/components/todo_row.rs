//! Todo Row Component
//!
//! Checkbox, name, description, owner and delete action for one todo.

use leptos::prelude::*;
use todo_sync::Todo;

use crate::context::AppContext;
use crate::presentation::title_class;

#[component]
pub fn TodoRow(todo: Todo) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let Todo {
        id,
        name,
        description,
        completed,
        user_email,
    } = todo;
    let toggle_id = id.clone();

    view! {
        <div class="list-group-item">
            <div class="d-flex align-items-center">
                <div class="form-check">
                    // The box only changes state through a reload
                    <input
                        type="checkbox"
                        class="form-check-input"
                        prop:checked=completed
                        on:click=move |ev| {
                            ev.prevent_default();
                            ctx.toggle(toggle_id.clone(), completed);
                        }
                    />
                </div>
                <div class="ms-3 flex-grow-1">
                    <h5 class=title_class(completed)>{name}</h5>
                    {description
                        .filter(|d| !d.is_empty())
                        .map(|d| view! { <p class="text-muted small mb-0">{d}</p> })}
                    <p class="text-muted small mb-0">"Assigned to: " {user_email}</p>
                </div>
                <button class="btn btn-danger btn-sm" on:click=move |_| ctx.delete(id.clone())>
                    "Delete"
                </button>
            </div>
        </div>
    }
}
