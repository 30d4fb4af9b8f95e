//! GraphQL Collection Client
//!
//! `TodoService` over a managed GraphQL endpoint (AppSync-style schema with
//! `listTodos` / `createTodo` / `updateTodo` / `deleteTodo`).

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ClientConfig, Credentials};
use crate::error::{SyncError, SyncResult};
use crate::model::{NewTodo, Todo, TodoFilter, TodoId, TodoPatch};
use crate::service::TodoService;

/// Items requested per `listTodos` page
const PAGE_SIZE: u32 = 100;

/// Upper bound on `listTodos` pages followed in one listing
const MAX_PAGES: usize = 1_000;

const LIST_TODOS: &str = "query ListTodos($filter: ModelTodoFilterInput, $limit: Int, $nextToken: String) {
  listTodos(filter: $filter, limit: $limit, nextToken: $nextToken) {
    items { id name description completed userEmail }
    nextToken
  }
}";

const CREATE_TODO: &str = "mutation CreateTodo($input: CreateTodoInput!) {
  createTodo(input: $input) { id name description completed userEmail }
}";

const UPDATE_TODO: &str = "mutation UpdateTodo($input: UpdateTodoInput!) {
  updateTodo(input: $input) { id name description completed userEmail }
}";

const DELETE_TODO: &str = "mutation DeleteTodo($input: DeleteTodoInput!) {
  deleteTodo(input: $input) { id }
}";

// ========================
// Wire Structs
// ========================

#[derive(Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphQlResponse<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlError {
    message: String,
    #[serde(default)]
    error_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListVariables<'a> {
    filter: &'a TodoFilter,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_token: Option<&'a str>,
}

#[derive(Serialize)]
struct InputVariables<T> {
    input: T,
}

#[derive(Serialize)]
struct UpdateInput<'a> {
    id: &'a TodoId,
    #[serde(flatten)]
    patch: &'a TodoPatch,
}

#[derive(Serialize)]
struct DeleteInput<'a> {
    id: &'a TodoId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListTodosData {
    list_todos: TodoPage,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoPage {
    items: Vec<Todo>,
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTodoData {
    create_todo: Todo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTodoData {
    update_todo: Todo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteTodoData {
    delete_todo: DeletedTodo,
}

#[derive(Deserialize)]
struct DeletedTodo {
    id: TodoId,
}

// ========================
// Client
// ========================

/// GraphQL implementation of [`TodoService`]
#[derive(Debug, Clone)]
pub struct GraphQlTodoService {
    http: reqwest::Client,
    endpoint: Url,
    credentials: Credentials,
}

impl GraphQlTodoService {
    pub fn new(config: &ClientConfig, credentials: Credentials) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SyncError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: config.graphql_url()?,
            credentials,
        })
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::ApiKey(key) => builder.header("x-api-key", key.as_str()),
            Credentials::IdToken(token) => builder.header(AUTHORIZATION, token.as_str()),
        }
    }

    async fn execute<V, D>(&self, operation: &str, query: &str, variables: V) -> SyncResult<D>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let request = self
            .authorize(self.http.post(self.endpoint.clone()))
            .json(&GraphQlRequest { query, variables });

        let resp = request
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if !status.is_success() {
            let detail = first_error_message(&body).unwrap_or(body);
            warn!(operation, %status, "GraphQL request failed");
            return Err(SyncError::from_status(status, detail));
        }

        // Errors come with a partial `data` object whose fields may be null,
        // so they are checked before decoding into `D`.
        let parsed: GraphQlResponse<serde_json::Value> = serde_json::from_str(&body)?;
        if let Some(err) = parsed.errors.first() {
            warn!(operation, errors = parsed.errors.len(), "GraphQL response carried errors");
            return Err(classify(err));
        }
        match parsed.data {
            Some(data) if !data.is_null() => Ok(serde_json::from_value(data)?),
            _ => Err(SyncError::InvalidResponse(format!(
                "{operation}: response has no data"
            ))),
        }
    }
}

fn classify(err: &GraphQlError) -> SyncError {
    let unauthorized = matches!(
        err.error_type.as_deref(),
        Some("Unauthorized" | "UnauthorizedException")
    ) || err.message.starts_with("Not Authorized");

    if unauthorized {
        SyncError::NotAuthenticated(err.message.clone())
    } else {
        match &err.error_type {
            Some(kind) => SyncError::Rejected(format!("{kind}: {}", err.message)),
            None => SyncError::Rejected(err.message.clone()),
        }
    }
}

fn first_error_message(body: &str) -> Option<String> {
    let parsed: GraphQlResponse<serde_json::Value> = serde_json::from_str(body).ok()?;
    parsed.errors.into_iter().next().map(|e| e.message)
}

#[async_trait(?Send)]
impl TodoService for GraphQlTodoService {
    async fn list(&self, filter: &TodoFilter) -> SyncResult<Vec<Todo>> {
        let mut todos = Vec::new();
        let mut next_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();
        let mut pages = 0usize;

        loop {
            if pages == MAX_PAGES {
                warn!(pages, "listTodos kept paging");
                return Err(SyncError::InvalidResponse(format!(
                    "listTodos: more than {MAX_PAGES} pages"
                )));
            }

            let variables = ListVariables {
                filter,
                limit: PAGE_SIZE,
                next_token: next_token.as_deref(),
            };
            let data: ListTodosData = self.execute("listTodos", LIST_TODOS, variables).await?;
            pages += 1;
            todos.extend(data.list_todos.items);

            match data.list_todos.next_token {
                Some(token) if !token.is_empty() => {
                    if !seen_tokens.insert(token.clone()) {
                        warn!(pages, "listTodos repeated a nextToken");
                        return Err(SyncError::InvalidResponse(format!(
                            "listTodos: nextToken {token:?} repeated"
                        )));
                    }
                    next_token = Some(token);
                }
                _ => break,
            }
        }

        debug!(pages, count = todos.len(), "listed todos");
        Ok(todos)
    }

    async fn create(&self, input: &NewTodo) -> SyncResult<Todo> {
        let data: CreateTodoData = self
            .execute("createTodo", CREATE_TODO, InputVariables { input })
            .await?;
        Ok(data.create_todo)
    }

    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> SyncResult<Todo> {
        let input = UpdateInput { id, patch };
        let data: UpdateTodoData = self
            .execute("updateTodo", UPDATE_TODO, InputVariables { input })
            .await?;
        Ok(data.update_todo)
    }

    async fn delete(&self, id: &TodoId) -> SyncResult<TodoId> {
        let input = DeleteInput { id };
        let data: DeleteTodoData = self
            .execute("deleteTodo", DELETE_TODO, InputVariables { input })
            .await?;
        Ok(data.delete_todo.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(message: &str, error_type: Option<&str>) -> GraphQlError {
        GraphQlError {
            message: message.to_string(),
            error_type: error_type.map(str::to_string),
        }
    }

    #[test]
    fn test_classify_unauthorized() {
        assert!(matches!(
            classify(&error("Not Authorized to access listTodos on type Query", None)),
            SyncError::NotAuthenticated(_)
        ));
        assert!(matches!(
            classify(&error("denied", Some("Unauthorized"))),
            SyncError::NotAuthenticated(_)
        ));
    }

    #[test]
    fn test_classify_rejected() {
        let err = classify(&error(
            "The conditional request failed",
            Some("DynamoDB:ConditionalCheckFailedException"),
        ));
        assert_eq!(
            err,
            SyncError::Rejected(
                "DynamoDB:ConditionalCheckFailedException: The conditional request failed".into()
            )
        );
    }

    #[test]
    fn test_first_error_message() {
        let body = r#"{"errors":[{"errorType":"UnauthorizedException","message":"You are not authorized to make this call."}]}"#;
        assert_eq!(
            first_error_message(body).as_deref(),
            Some("You are not authorized to make this call.")
        );
        assert_eq!(first_error_message("<html>"), None);
    }
}
