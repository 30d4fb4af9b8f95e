//! Synchronization View
//!
//! Holds the current user's todos and the pending new-item form, issues
//! mutations to the collection service and refreshes the whole list after
//! each one succeeds. Nothing is applied locally ahead of the service.
//!
//! Reloads are tagged with a strictly increasing sequence number when they
//! are issued; a response is applied only if its tag is still the latest,
//! so an overlapping older reload can never overwrite a newer one.

use std::cell::{Cell, RefCell};

use tracing::{debug, error, info, warn};

use crate::error::{SyncError, SyncResult};
use crate::model::{NewTodo, Todo, TodoFilter, TodoId, TodoPatch, UserAttributes};
use crate::service::{IdentityProvider, TodoService};


/// Everything the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Todos in the order returned by the service
    pub todos: Vec<Todo>,
    pub pending_name: String,
    pub pending_description: String,
    /// `None` until the session resolves
    pub user: Option<UserAttributes>,
    /// Most recent failure, until dismissed
    pub last_error: Option<SyncError>,
    /// Bumped every time a failure is recorded, equal errors included
    pub error_seq: u64,
}

impl ViewState {
    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }
}

/// Outcome of a list reload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reload {
    /// The response replaced the local collection
    Applied(usize),
    /// A newer reload was issued meanwhile; the response was discarded
    Superseded,
    /// No user email is known, nothing was requested
    NoSession,
}

/// Outcome of submitting the new-item form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Created(Todo),
    /// Blank name or no session; nothing was sent
    Skipped,
}

pub struct SyncView<S> {
    service: S,
    state: RefCell<ViewState>,
    latest_reload: Cell<u64>,
}

impl<S: TodoService> SyncView<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RefCell::new(ViewState::default()),
            latest_reload: Cell::new(0),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn set_pending_name(&self, name: impl Into<String>) {
        self.state.borrow_mut().pending_name = name.into();
    }

    pub fn set_pending_description(&self, description: impl Into<String>) {
        self.state.borrow_mut().pending_description = description.into();
    }

    pub fn dismiss_error(&self) {
        self.state.borrow_mut().last_error = None;
    }

    /// Clear the recorded error only if nothing was recorded after `seq`.
    pub fn dismiss_error_if(&self, seq: u64) {
        let mut state = self.state.borrow_mut();
        if state.error_seq == seq {
            state.last_error = None;
        }
    }

    fn record(&self, err: SyncError) {
        let mut state = self.state.borrow_mut();
        state.error_seq += 1;
        state.last_error = Some(err);
    }

    fn current_email(&self) -> Option<String> {
        self.state.borrow().user_email().map(str::to_string)
    }

    fn next_reload_tag(&self) -> u64 {
        let tag = self.latest_reload.get() + 1;
        self.latest_reload.set(tag);
        tag
    }

    /// Drop the user and the collection, and orphan any reload in flight.
    fn reset_session(&self) {
        self.next_reload_tag();
        let mut state = self.state.borrow_mut();
        state.user = None;
        state.todos.clear();
    }

    // ========================
    // Session
    // ========================

    /// Ask the identity provider for the current user.
    ///
    /// A missing session and a failed lookup both leave the view logged out;
    /// they differ only in how they are logged. Returns the user's email.
    pub async fn resolve_session<I>(&self, identity: &I) -> Option<String>
    where
        I: IdentityProvider + ?Sized,
    {
        match identity.current_user_attributes().await {
            Ok(Some(user)) => {
                let email = user.email.clone();
                debug!(email = ?email, "session resolved");
                self.state.borrow_mut().user = Some(user);
                email
            }
            Ok(None) => {
                debug!("no active session");
                self.reset_session();
                None
            }
            Err(e) => {
                warn!(error = %e, "session resolution failed");
                self.reset_session();
                None
            }
        }
    }

    /// Resolve the session, then load the user's todos if an email is known.
    pub async fn activate<I>(&self, identity: &I) -> SyncResult<Reload>
    where
        I: IdentityProvider + ?Sized,
    {
        if self.resolve_session(identity).await.is_none() {
            return Ok(Reload::NoSession);
        }
        self.reload().await
    }

    // ========================
    // Reload
    // ========================

    /// Re-fetch the full collection for the current user.
    ///
    /// On failure the local collection is left exactly as it was.
    pub async fn reload(&self) -> SyncResult<Reload> {
        let Some(email) = self.current_email() else {
            debug!("reload skipped, no user email");
            return Ok(Reload::NoSession);
        };

        let tag = self.next_reload_tag();
        let result = self.service.list(&TodoFilter::owned_by(&email)).await;
        let latest = self.latest_reload.get();

        match result {
            Ok(_) if tag != latest => {
                debug!(tag, latest, "discarding superseded reload");
                Ok(Reload::Superseded)
            }
            Ok(todos) => {
                let count = todos.len();
                self.state.borrow_mut().todos = todos;
                debug!(tag, count, "reload applied");
                Ok(Reload::Applied(count))
            }
            Err(e) => {
                error!(tag, error = %e, "Error fetching todos");
                if tag == latest {
                    self.record(e.clone());
                }
                Err(e)
            }
        }
    }

    async fn reload_after(&self, operation: &'static str) {
        if let Err(e) = self.reload().await {
            debug!(operation, error = %e, "list stays stale after mutation");
        }
    }

    // ========================
    // Mutations
    // ========================

    /// Submit the pending form as a new todo.
    ///
    /// A blank name or an unknown user makes this a no-op. On failure the
    /// pending fields are kept so the same submission can be retried.
    pub async fn create(&self) -> SyncResult<Submission> {
        let input = {
            let state = self.state.borrow();
            let Some(email) = state.user_email() else {
                return Ok(Submission::Skipped);
            };
            if state.pending_name.trim().is_empty() {
                return Ok(Submission::Skipped);
            }
            NewTodo::from_form(&state.pending_name, &state.pending_description, email)
        };

        match self.service.create(&input).await {
            Ok(todo) => {
                info!(id = %todo.id, "created todo");
                {
                    let mut state = self.state.borrow_mut();
                    state.pending_name.clear();
                    state.pending_description.clear();
                }
                self.reload_after("create").await;
                Ok(Submission::Created(todo))
            }
            Err(e) => {
                error!(error = %e, "Error creating todo");
                self.record(e.clone());
                Err(e)
            }
        }
    }

    /// Flip completion. `completed` is the value currently displayed.
    pub async fn toggle(&self, id: &TodoId, completed: bool) -> SyncResult<Todo> {
        let patch = TodoPatch::completed(!completed);
        match self.service.update(id, &patch).await {
            Ok(todo) => {
                info!(%id, completed = !completed, "updated todo");
                self.reload_after("toggle").await;
                Ok(todo)
            }
            Err(e) => {
                error!(%id, error = %e, "Error updating todo");
                self.record(e.clone());
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: &TodoId) -> SyncResult<TodoId> {
        match self.service.delete(id).await {
            Ok(deleted) => {
                info!(id = %deleted, "deleted todo");
                self.reload_after("delete").await;
                Ok(deleted)
            }
            Err(e) => {
                error!(%id, error = %e, "Error deleting todo");
                self.record(e.clone());
                Err(e)
            }
        }
    }
}
