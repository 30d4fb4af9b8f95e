//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is a
//! render copy of the synchronization view's state.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_sync::{SyncError, Todo, ViewState};

/// Application state with field-level reactivity
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct AppState {
    /// Current user's todos, as last reloaded
    pub todos: Vec<Todo>,
    /// New-item form fields
    pub pending_name: String,
    pub pending_description: String,
    /// Signed-in user's email, once resolved
    pub user_email: Option<String>,
    /// Last failure, shown in the banner
    pub last_error: Option<SyncError>,
    /// Identifies which recording of `last_error` is shown
    pub error_seq: u64,
}

impl From<ViewState> for AppState {
    fn from(state: ViewState) -> Self {
        let user_email = state.user_email().map(str::to_string);
        Self {
            todos: state.todos,
            pending_name: state.pending_name,
            pending_description: state.pending_description,
            user_email,
            last_error: state.last_error,
            error_seq: state.error_seq,
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Copy a fresh state into the store, touching only fields that changed
pub fn store_apply(store: &AppStore, next: AppState) {
    let AppState {
        todos,
        pending_name,
        pending_description,
        user_email,
        last_error,
        error_seq,
    } = next;

    if store.todos().with_untracked(|current| *current != todos) {
        *store.todos().write() = todos;
    }
    if store.pending_name().with_untracked(|current| *current != pending_name) {
        *store.pending_name().write() = pending_name;
    }
    if store
        .pending_description()
        .with_untracked(|current| *current != pending_description)
    {
        *store.pending_description().write() = pending_description;
    }
    if store.user_email().with_untracked(|current| *current != user_email) {
        *store.user_email().write() = user_email;
    }
    if store.error_seq().with_untracked(|current| *current != error_seq) {
        *store.error_seq().write() = error_seq;
    }
    if store.last_error().with_untracked(|current| *current != last_error) {
        *store.last_error().write() = last_error;
    }
}
