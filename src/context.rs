//! Application Context
//!
//! Shared handles provided via Leptos Context API. The clients are not
//! `Send`, so they sit in local-storage `StoredValue`s.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_sync::{CognitoIdentity, GraphQlTodoService, Reload, SyncResult, SyncView, TodoId};

use crate::store::{store_apply, AppStore};

pub type TodoView = SyncView<GraphQlTodoService>;

/// Session handle for the sign-in form and the navigation bar
#[derive(Clone, Copy)]
pub struct SessionContext {
    identity: StoredValue<Rc<CognitoIdentity>, LocalStorage>,
    /// Whether the app behind the sign-in gate is shown - read
    pub signed_in: ReadSignal<bool>,
    /// Whether the app behind the sign-in gate is shown - write
    set_signed_in: WriteSignal<bool>,
}

impl SessionContext {
    pub fn new(identity: CognitoIdentity) -> Self {
        let (signed_in, set_signed_in) = signal(false);
        Self {
            identity: StoredValue::new_local(Rc::new(identity)),
            signed_in,
            set_signed_in,
        }
    }

    pub fn identity(&self) -> Rc<CognitoIdentity> {
        self.identity.get_value()
    }

    pub fn set_signed_in(&self, signed_in: bool) {
        self.set_signed_in.set(signed_in);
    }
}

/// Synchronization view plus its render store
#[derive(Clone, Copy)]
pub struct AppContext {
    view: StoredValue<Rc<TodoView>, LocalStorage>,
    pub store: AppStore,
}

impl AppContext {
    pub fn new(view: TodoView, store: AppStore) -> Self {
        Self {
            view: StoredValue::new_local(Rc::new(view)),
            store,
        }
    }

    /// Copy the view's state into the store.
    ///
    /// No-op once the page is unmounted (signed out while a call was in flight).
    pub fn refresh(&self) {
        let Some(snapshot) = self.view.try_with_value(|view| view.snapshot()) else {
            return;
        };
        store_apply(&self.store, snapshot.into());
    }

    /// Run an async view operation, then re-render from its resulting state
    fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce(Rc<TodoView>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let view = self.view.get_value();
        let ctx = *self;
        spawn_local(async move {
            op(view).await;
            ctx.refresh();
        });
    }

    /// Resolve the session and load the user's todos.
    ///
    /// Falls back to the sign-in form when the session turns out to be gone.
    pub fn activate(&self, session: SessionContext) {
        let view = self.view.get_value();
        let identity = session.identity();
        let ctx = *self;
        spawn_local(async move {
            let outcome = view.activate(identity.as_ref()).await;
            ctx.refresh();
            if session_ended(&outcome) {
                tracing::info!("session ended, showing sign-in");
                session.set_signed_in(false);
            }
        });
    }

    pub fn set_pending_name(&self, name: String) {
        self.view.with_value(|view| view.set_pending_name(name));
        self.refresh();
    }

    pub fn set_pending_description(&self, description: String) {
        self.view
            .with_value(|view| view.set_pending_description(description));
        self.refresh();
    }

    pub fn create(&self) {
        self.run(|view| async move {
            let _ = view.create().await;
        });
    }

    pub fn toggle(&self, id: TodoId, completed: bool) {
        self.run(move |view| async move {
            let _ = view.toggle(&id, completed).await;
        });
    }

    pub fn delete(&self, id: TodoId) {
        self.run(move |view| async move {
            let _ = view.delete(&id).await;
        });
    }

    pub fn dismiss_error(&self) {
        self.view.with_value(|view| view.dismiss_error());
        self.refresh();
    }

    /// Dismiss the error recorded as `seq` unless a newer one replaced it
    pub fn dismiss_error_if(&self, seq: u64) {
        if self
            .view
            .try_with_value(|view| view.dismiss_error_if(seq))
            .is_some()
        {
            self.refresh();
        }
    }
}

/// Whether activation found no usable session
fn session_ended(outcome: &SyncResult<Reload>) -> bool {
    matches!(outcome, Ok(Reload::NoSession))
}
