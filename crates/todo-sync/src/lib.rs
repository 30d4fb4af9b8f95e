//! TaskApp Sync Core
//!
//! Layered architecture:
//! - model: the `Todo` entity and its request shapes
//! - service: traits for the external identity and collection services
//! - graphql / cognito: HTTP implementations of those traits
//! - view: the synchronization view that keeps the local list in step with the service

mod cognito;
mod config;
mod error;
mod graphql;
mod model;
mod service;
mod view;

pub use cognito::CognitoIdentity;
pub use config::{AuthMode, ClientConfig, Credentials};
pub use error::{ErrorKind, SyncError, SyncResult};
pub use graphql::GraphQlTodoService;
pub use model::{Equals, NewTodo, Todo, TodoFilter, TodoId, TodoPatch, UserAttributes};
pub use service::{IdentityProvider, TodoService};
pub use view::{Reload, Submission, SyncView, ViewState};
