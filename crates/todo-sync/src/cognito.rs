//! User Pool Identity Client
//!
//! `IdentityProvider` backed by the user-pool JSON-1.1 RPC API
//! (`InitiateAuth`, `GetUser`, `GlobalSignOut`). The session lives in
//! memory for the lifetime of the page.

use std::cell::RefCell;
use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{SyncError, SyncResult};
use crate::model::UserAttributes;
use crate::service::IdentityProvider;

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const AMZ_JSON: &str = "application/x-amz-json-1.1";

#[derive(Debug, Clone)]
struct Session {
    access_token: String,
    id_token: String,
}

// ========================
// Wire Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: BTreeMap<&'a str, &'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    #[serde(default)]
    authentication_result: Option<AuthenticationResult>,
    #[serde(default)]
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
    id_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AccessTokenRequest<'a> {
    access_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetUserResponse {
    #[serde(default)]
    user_attributes: Vec<AttributeType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeType {
    name: String,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct ServiceError {
    #[serde(rename = "__type", default)]
    kind: String,
    #[serde(default, alias = "Message")]
    message: String,
}

// ========================
// Client
// ========================

#[derive(Debug)]
pub struct CognitoIdentity {
    http: reqwest::Client,
    endpoint: Url,
    client_id: String,
    session: RefCell<Option<Session>>,
}

impl CognitoIdentity {
    pub fn new(config: &ClientConfig) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SyncError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: config.identity_url()?,
            client_id: config.user_pool_client_id.clone(),
            session: RefCell::new(None),
        })
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Id token of the current session, used for user-pool GraphQL auth.
    pub fn id_token(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.id_token.clone())
    }

    /// Sign in with username (or email) and password.
    pub async fn sign_in(&self, username: &str, password: &str) -> SyncResult<()> {
        let request = InitiateAuthRequest {
            auth_flow: "USER_PASSWORD_AUTH",
            client_id: &self.client_id,
            auth_parameters: BTreeMap::from([("USERNAME", username), ("PASSWORD", password)]),
        };
        let resp: InitiateAuthResponse = self.call("InitiateAuth", &request).await?;

        if let Some(challenge) = resp.challenge_name {
            warn!(%challenge, "sign-in challenge is not supported");
            return Err(SyncError::Rejected(format!(
                "sign-in challenge {challenge} is not supported"
            )));
        }
        let result = resp.authentication_result.ok_or_else(|| {
            SyncError::InvalidResponse("InitiateAuth returned no tokens".into())
        })?;

        *self.session.borrow_mut() = Some(Session {
            access_token: result.access_token,
            id_token: result.id_token,
        });
        info!(username, "signed in");
        Ok(())
    }

    fn access_token(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.access_token.clone())
    }

    async fn call<B, R>(&self, action: &str, body: &B) -> SyncResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{action}"))
            .header(CONTENT_TYPE, AMZ_JSON)
            .body(serde_json::to_string(body)?)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if status.is_success() {
            Ok(serde_json::from_str(&text)?)
        } else {
            debug!(action, %status, "identity call failed");
            Err(classify(status, &text))
        }
    }
}

fn classify(status: StatusCode, body: &str) -> SyncError {
    let Ok(err) = serde_json::from_str::<ServiceError>(body) else {
        return SyncError::from_status(status, body);
    };
    // `__type` may be namespaced, e.g. `com.amazonaws...#NotAuthorizedException`
    let kind = err.kind.rsplit('#').next().unwrap_or_default();
    match kind {
        "NotAuthorizedException" | "UserNotFoundException" | "UserNotConfirmedException"
        | "PasswordResetRequiredException" => {
            SyncError::NotAuthenticated(format!("{kind}: {}", err.message))
        }
        "" => SyncError::from_status(status, err.message),
        _ => SyncError::Rejected(format!("{kind}: {}", err.message)),
    }
}

#[async_trait(?Send)]
impl IdentityProvider for CognitoIdentity {
    async fn current_user_attributes(&self) -> SyncResult<Option<UserAttributes>> {
        let Some(access_token) = self.access_token() else {
            return Ok(None);
        };

        let resp: GetUserResponse = match self
            .call("GetUser", &AccessTokenRequest { access_token: &access_token })
            .await
        {
            Ok(resp) => resp,
            Err(e @ SyncError::NotAuthenticated(_)) => {
                self.session.borrow_mut().take();
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        Ok(Some(UserAttributes::from_pairs(
            resp.user_attributes.into_iter().map(|a| (a.name, a.value)),
        )))
    }

    async fn sign_out(&self) -> SyncResult<()> {
        let session = self.session.borrow_mut().take();
        let Some(session) = session else {
            return Ok(());
        };
        let _: IgnoredAny = self
            .call(
                "GlobalSignOut",
                &AccessTokenRequest {
                    access_token: &session.access_token,
                },
            )
            .await?;
        info!("signed out");
        Ok(())
    }
}
