//! TaskApp Frontend App
//!
//! Sign-in gate around the todo page.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_sync::{ClientConfig, CognitoIdentity, GraphQlTodoService, SyncResult, SyncView};

use crate::components::{ErrorBanner, Navbar, NewTodoForm, SignInForm, TodoList};
use crate::context::{AppContext, SessionContext, TodoView};
use crate::presentation::heading;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App(config: ClientConfig, identity: CognitoIdentity) -> impl IntoView {
    // Provide context to all children
    provide_context(config);
    let session = SessionContext::new(identity);
    provide_context(session);

    view! {
        <Show
            when=move || session.signed_in.get()
            fallback=|| view! { <SignInForm /> }
        >
            <Navbar />
            <TodoApp />
        </Show>
    }
}

/// Build the collection client for the signed-in session
fn todo_view(config: &ClientConfig, session: &SessionContext) -> SyncResult<TodoView> {
    let id_token = session.identity().id_token();
    let credentials = config.credentials(id_token.as_deref())?;
    Ok(SyncView::new(GraphQlTodoService::new(config, credentials)?))
}

#[component]
pub fn TodoApp() -> impl IntoView {
    let config = use_context::<ClientConfig>().expect("ClientConfig should be provided");
    let session = use_context::<SessionContext>().expect("SessionContext should be provided");

    let sync_view = match todo_view(&config, &session) {
        Ok(sync_view) => sync_view,
        Err(e) => {
            tracing::error!(error = %e, "cannot create todo client");
            return view! {
                <div class="container py-5">
                    <div class="alert alert-danger">{e.to_string()}</div>
                </div>
            }
            .into_any();
        }
    };

    let ctx = AppContext::new(sync_view, Store::new(AppState::default()));
    provide_context(ctx);
    let store = ctx.store;

    // Resolve the user and load their todos on mount
    Effect::new(move |_| {
        ctx.activate(session);
    });

    view! {
        <div class="container py-5">
            <div class="row justify-content-center">
                <div class="col-md-8">
                    <h1 class="text-center mb-4">
                        {move || heading(store.user_email().get().as_deref())}
                    </h1>

                    <ErrorBanner />

                    <NewTodoForm />

                    <TodoList />
                </div>
            </div>
        </div>
    }
    .into_any()
}
