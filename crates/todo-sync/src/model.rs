//! Domain Model
//!
//! The `Todo` entity and the request shapes sent to the collection service.
//! Field names follow the service's camelCase wire format.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Service-assigned identifier of a todo. Never generated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Todo as stored by the collection service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub user_email: String,
}

/// Create input. `description` is sent as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub user_email: String,
}

impl NewTodo {
    /// Build a create input from the raw form fields.
    ///
    /// An empty description is coerced to `None`; the name is kept as typed.
    pub fn from_form(name: &str, description: &str, user_email: &str) -> Self {
        Self {
            name: name.to_string(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            completed: false,
            user_email: user_email.to_string(),
        }
    }
}

/// Field update. Absent fields are left untouched by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Equals {
    pub eq: String,
}

/// Equality filter on the owning user, `{ "userEmail": { "eq": ... } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoFilter {
    pub user_email: Equals,
}

impl TodoFilter {
    pub fn owned_by(email: &str) -> Self {
        Self {
            user_email: Equals {
                eq: email.to_string(),
            },
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        todo.user_email == self.user_email.eq
    }
}

/// Profile attributes of the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAttributes {
    pub email: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl UserAttributes {
    /// Collect name/value pairs as reported by the identity provider.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            email: attributes.get("email").cloned(),
            attributes,
        }
    }
}
