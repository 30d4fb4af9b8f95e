//! External Service Traits
//!
//! Abstract interfaces for the identity provider and the remote todo
//! collection. Implementations speak HTTP in the app and live in memory in
//! tests. Futures are not required to be `Send`: the browser runs them with
//! `spawn_local`.

use std::rc::Rc;

use async_trait::async_trait;

use crate::error::SyncResult;
use crate::model::{NewTodo, Todo, TodoFilter, TodoId, TodoPatch, UserAttributes};

/// Session and profile of the current user
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Attributes of the signed-in user, `None` when there is no session.
    async fn current_user_attributes(&self) -> SyncResult<Option<UserAttributes>>;

    /// End the current session.
    async fn sign_out(&self) -> SyncResult<()>;
}

/// CRUD over the remote `Todo` collection
#[async_trait(?Send)]
pub trait TodoService {
    /// List every todo matching the filter
    async fn list(&self, filter: &TodoFilter) -> SyncResult<Vec<Todo>>;

    /// Create a todo; the service assigns the id
    async fn create(&self, input: &NewTodo) -> SyncResult<Todo>;

    /// Update the given fields of a todo
    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> SyncResult<Todo>;

    /// Delete a todo, returning the id of the deleted item
    async fn delete(&self, id: &TodoId) -> SyncResult<TodoId>;
}

/// Views over one shared collection
#[async_trait(?Send)]
impl<T: TodoService + ?Sized> TodoService for Rc<T> {
    async fn list(&self, filter: &TodoFilter) -> SyncResult<Vec<Todo>> {
        (**self).list(filter).await
    }

    async fn create(&self, input: &NewTodo) -> SyncResult<Todo> {
        (**self).create(input).await
    }

    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> SyncResult<Todo> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &TodoId) -> SyncResult<TodoId> {
        (**self).delete(id).await
    }
}
