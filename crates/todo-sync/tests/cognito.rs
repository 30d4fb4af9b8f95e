//! Identity client integration tests with wiremock.

use serde_json::json;
use todo_sync::{ClientConfig, CognitoIdentity, IdentityProvider, SyncError};
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TARGET: &str = "X-Amz-Target";

fn identity(server: &MockServer) -> CognitoIdentity {
    let config = ClientConfig::from_json(
        &json!({
            "aws_project_region": "us-east-1",
            "aws_appsync_graphqlEndpoint": "https://example.com/graphql",
            "aws_appsync_region": "us-east-1",
            "aws_appsync_authenticationType": "API_KEY",
            "aws_appsync_apiKey": "da2-test",
            "aws_cognito_region": "us-east-1",
            "aws_user_pools_id": "us-east-1_test",
            "aws_user_pools_web_client_id": "client-id",
            "cognito_endpoint": format!("{}/", server.uri())
        })
        .to_string(),
    )
    .expect("valid config");
    CognitoIdentity::new(&config).expect("Failed to create identity client")
}

async fn mount_sign_in(server: &MockServer) {
    Mock::given(method("POST"))
        .and(header(TARGET, "AWSCognitoIdentityProviderService.InitiateAuth"))
        .and(header("content-type", "application/x-amz-json-1.1"))
        .and(body_partial_json(json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "ClientId": "client-id",
            "AuthParameters": { "USERNAME": "a@x.com", "PASSWORD": "hunter22" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "AuthenticationResult": {
                "AccessToken": "access-1",
                "IdToken": "id-1",
                "RefreshToken": "refresh-1",
                "ExpiresIn": 3600,
                "TokenType": "Bearer"
            },
            "ChallengeParameters": {}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn no_session_means_no_attributes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let identity = identity(&server);
    assert!(!identity.is_signed_in());
    assert_eq!(identity.current_user_attributes().await, Ok(None));
    assert_eq!(identity.sign_out().await, Ok(()));
}

#[tokio::test]
async fn sign_in_then_fetch_attributes() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    Mock::given(method("POST"))
        .and(header(TARGET, "AWSCognitoIdentityProviderService.GetUser"))
        .and(body_partial_json(json!({ "AccessToken": "access-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Username": "0f1e2d3c",
            "UserAttributes": [
                { "Name": "sub", "Value": "0f1e2d3c" },
                { "Name": "email", "Value": "a@x.com" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let identity = identity(&server);
    identity
        .sign_in("a@x.com", "hunter22")
        .await
        .expect("Failed to sign in");
    assert_eq!(identity.id_token().as_deref(), Some("id-1"));

    let attrs = identity
        .current_user_attributes()
        .await
        .expect("Failed to get user")
        .expect("signed in");
    assert_eq!(attrs.email.as_deref(), Some("a@x.com"));
    assert_eq!(attrs.attributes.get("sub").map(String::as_str), Some("0f1e2d3c"));
}

#[tokio::test]
async fn wrong_password_is_not_authenticated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header(TARGET, "AWSCognitoIdentityProviderService.InitiateAuth"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "NotAuthorizedException",
            "message": "Incorrect username or password."
        })))
        .mount(&server)
        .await;

    let identity = identity(&server);
    let err = identity
        .sign_in("a@x.com", "wrong")
        .await
        .expect_err("sign in should fail");

    assert!(matches!(err, SyncError::NotAuthenticated(_)));
    assert!(!identity.is_signed_in());
}

#[tokio::test]
async fn challenge_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header(TARGET, "AWSCognitoIdentityProviderService.InitiateAuth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ChallengeName": "NEW_PASSWORD_REQUIRED",
            "Session": "opaque",
            "ChallengeParameters": {}
        })))
        .mount(&server)
        .await;

    let identity = identity(&server);
    let err = identity
        .sign_in("a@x.com", "temporary")
        .await
        .expect_err("challenge should fail");

    assert!(matches!(err, SyncError::Rejected(msg) if msg.contains("NEW_PASSWORD_REQUIRED")));
    assert!(!identity.is_signed_in());
}

#[tokio::test]
async fn sign_out_ends_session() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    Mock::given(method("POST"))
        .and(header(TARGET, "AWSCognitoIdentityProviderService.GlobalSignOut"))
        .and(body_partial_json(json!({ "AccessToken": "access-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let identity = identity(&server);
    identity
        .sign_in("a@x.com", "hunter22")
        .await
        .expect("Failed to sign in");
    identity.sign_out().await.expect("Failed to sign out");

    assert!(!identity.is_signed_in());
    assert_eq!(identity.current_user_attributes().await, Ok(None));
}

#[tokio::test]
async fn failed_sign_out_still_ends_local_session() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    Mock::given(method("POST"))
        .and(header(TARGET, "AWSCognitoIdentityProviderService.GlobalSignOut"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let identity = identity(&server);
    identity
        .sign_in("a@x.com", "hunter22")
        .await
        .expect("Failed to sign in");

    let err = identity.sign_out().await.expect_err("remote sign out fails");
    assert!(matches!(err, SyncError::Rejected(_)));
    assert!(!identity.is_signed_in());
    assert_eq!(identity.current_user_attributes().await, Ok(None));
}

#[tokio::test]
async fn expired_token_drops_session() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    Mock::given(method("POST"))
        .and(header(TARGET, "AWSCognitoIdentityProviderService.GetUser"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "NotAuthorizedException",
            "message": "Access Token has expired"
        })))
        .mount(&server)
        .await;

    let identity = identity(&server);
    identity
        .sign_in("a@x.com", "hunter22")
        .await
        .expect("Failed to sign in");

    let err = identity
        .current_user_attributes()
        .await
        .expect_err("expired token");
    assert!(matches!(err, SyncError::NotAuthenticated(_)));
    assert!(!identity.is_signed_in());
}
