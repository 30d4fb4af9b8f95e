//! Client Configuration
//!
//! Endpoint, region and credential settings, read once at start-up from the
//! Amplify-style `aws-exports.json` document and handed to each client.

use reqwest::Url;
use serde::Deserialize;

use crate::error::{SyncError, SyncResult};

/// How requests to the GraphQL endpoint are authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AuthMode {
    #[serde(rename = "API_KEY")]
    ApiKey,
    #[serde(rename = "AMAZON_COGNITO_USER_POOLS")]
    UserPools,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(rename = "aws_project_region")]
    pub project_region: String,
    #[serde(rename = "aws_appsync_graphqlEndpoint")]
    pub graphql_endpoint: String,
    #[serde(rename = "aws_appsync_region")]
    pub appsync_region: String,
    #[serde(rename = "aws_appsync_authenticationType")]
    pub auth_mode: AuthMode,
    #[serde(rename = "aws_appsync_apiKey", default)]
    pub api_key: Option<String>,
    #[serde(rename = "aws_cognito_region")]
    pub cognito_region: String,
    #[serde(rename = "aws_user_pools_id")]
    pub user_pool_id: String,
    #[serde(rename = "aws_user_pools_web_client_id")]
    pub user_pool_client_id: String,
    /// Overrides the regional identity endpoint (local stacks, tests).
    #[serde(default)]
    pub cognito_endpoint: Option<String>,
}

/// Credentials attached to GraphQL requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey(String),
    IdToken(String),
}

impl ClientConfig {
    /// Parse and validate a configuration document.
    pub fn from_json(json: &str) -> SyncResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SyncError::Config(format!("unreadable configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SyncResult<()> {
        self.graphql_url()?;
        self.identity_url()?;
        if self.auth_mode == AuthMode::ApiKey
            && self.api_key.as_deref().map_or(true, str::is_empty)
        {
            return Err(SyncError::Config(
                "API_KEY authentication requires aws_appsync_apiKey".into(),
            ));
        }
        if self.user_pool_client_id.is_empty() {
            return Err(SyncError::Config(
                "aws_user_pools_web_client_id is empty".into(),
            ));
        }
        Ok(())
    }

    pub fn graphql_url(&self) -> SyncResult<Url> {
        parse_http_url(&self.graphql_endpoint, "aws_appsync_graphqlEndpoint")
    }

    pub fn identity_url(&self) -> SyncResult<Url> {
        match &self.cognito_endpoint {
            Some(endpoint) => parse_http_url(endpoint, "cognito_endpoint"),
            None => parse_http_url(
                &format!("https://cognito-idp.{}.amazonaws.com/", self.cognito_region),
                "aws_cognito_region",
            ),
        }
    }

    /// Credentials for the GraphQL client given the current id token.
    pub fn credentials(&self, id_token: Option<&str>) -> SyncResult<Credentials> {
        match self.auth_mode {
            AuthMode::ApiKey => self
                .api_key
                .clone()
                .map(Credentials::ApiKey)
                .ok_or_else(|| SyncError::Config("missing aws_appsync_apiKey".into())),
            AuthMode::UserPools => id_token
                .map(|token| Credentials::IdToken(token.to_string()))
                .ok_or_else(|| SyncError::NotAuthenticated("no id token for user pool auth".into())),
        }
    }
}

fn parse_http_url(raw: &str, field: &str) -> SyncResult<Url> {
    let url = Url::parse(raw).map_err(|e| SyncError::Config(format!("{field}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SyncError::Config(format!(
            "{field}: unsupported scheme `{other}`"
        ))),
    }
}
