//! End-to-end tests of the GraphQL transport and auth flow against a mock
//! HTTP server.

use std::net::TcpListener;
use std::time::Duration as StdDuration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use mockito::{Matcher, Server};
use serde_json::json;

use frankie_core::auth::{parse_expiration, AuthManager, CredentialStore, Credentials};
use frankie_core::{ApiClient, ApiError, Country};

fn token_expiring_in(offset: Duration) -> String {
    let exp = (Utc::now() + offset).timestamp();
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp))
    )
}

fn endpoint(server: &Server) -> String {
    format!("{}/", server.url())
}

#[tokio::test]
async fn graphql_auth_error_with_ok_status() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":null,"errors":[{"message":"user-error:auth-required","path":["me"]}]}"#)
        .expect(1)
        .create_async()
        .await;
    let client = ApiClient::with_base_url(endpoint(&server)).expect("client");

    //* When
    let err = client
        .execute("query Me { me { email } }", "Me", None)
        .await
        .unwrap_err();

    //* Then
    mock.assert_async().await;
    assert_eq!(err.downcast_ref::<ApiError>(), Some(&ApiError::AuthRequired));
}

#[tokio::test]
async fn http_status_classification() {
    let mut server = Server::new_async().await;
    let client = ApiClient::with_base_url(endpoint(&server)).expect("client");

    let unauthorized = server
        .mock("POST", "/")
        .with_status(401)
        .with_body("{}")
        .create_async()
        .await;
    let err = client.execute("query V { version }", "V", None).await.unwrap_err();
    assert_eq!(err.downcast_ref::<ApiError>(), Some(&ApiError::AuthRequired));
    unauthorized.remove_async().await;

    server
        .mock("POST", "/")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;
    let err = client.execute("query V { version }", "V", None).await.unwrap_err();
    assert_eq!(err.downcast_ref::<ApiError>(), Some(&ApiError::ServerError(503)));
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = ApiClient::with_base_url(format!("http://{}/", addr)).expect("client");
    let err = client.execute("query V { version }", "V", None).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Network(_))));
}

#[tokio::test]
async fn silent_server_times_out_as_network_error() {
    // The kernel completes the handshake, but nothing ever answers
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");

    let client = ApiClient::with_timeout(format!("http://{}/", addr), StdDuration::from_millis(100))
        .expect("client");
    let err = client.execute("query V { version }", "V", None).await.unwrap_err();

    assert_eq!(
        err.downcast_ref::<ApiError>(),
        Some(&ApiError::Network("request timed out".to_string()))
    );
    drop(listener);
}

#[tokio::test]
async fn execute_raw_keeps_graphql_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"data":null,"errors":[{"message":"Cannot query field"}]}"#)
        .create_async()
        .await;
    let client = ApiClient::with_base_url(endpoint(&server)).expect("client");

    let body = client
        .execute_raw("query Bad { nope }", "Bad", None)
        .await
        .expect("raw body");
    assert_eq!(body["errors"][0]["message"], "Cannot query field");
}

#[tokio::test]
async fn request_carries_client_headers() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_header("x-graphql-client-name", "frank-app")
        .match_header("x-graphql-client-version", "4.13.3")
        .match_header("x-graphql-client-os", "ios/26.0.1")
        .match_header("skip-graphcdn", "1")
        .match_header("authorization", "Bearer a.b.c")
        .match_header("x-country", "BE")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "Version",
            "query": "query Version { version }"
        })))
        .with_status(200)
        .with_body(r#"{"data":{"version":"1"}}"#)
        .expect(1)
        .create_async()
        .await;

    let mut client = ApiClient::with_base_url(endpoint(&server)).expect("client");
    client.set_token("a.b.c".to_string());
    client.set_country(Country::Belgium);

    //* When
    let response = client
        .execute("query Version { version }", "Version", None)
        .await
        .expect("ok");

    //* Then
    mock.assert_async().await;
    assert_eq!(response.data["version"], "1");
}

#[tokio::test]
async fn anonymous_request_has_no_auth_or_country() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("authorization", Matcher::Missing)
        .match_header("x-country", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"data":{"version":"1"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = ApiClient::with_base_url(endpoint(&server)).expect("client");
    client.execute("query Version { version }", "Version", None).await.expect("ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn login_then_reuse_stored_token() {
    //* Given
    let auth = token_expiring_in(Duration::days(1));
    let mut server = Server::new_async().await;
    let login_mock = server
        .mock("POST", "/")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::PartialJson(json!({
            "operationName": "Login",
            "variables": { "email": "jan@example.nl", "password": "secret" }
        })))
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "login": { "authToken": auth, "refreshToken": "refresh-1", "__typename": "AuthResponse" },
                    "version": "1"
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let store = CredentialStore::new(dir.path().join("credentials.json"));
    let client = ApiClient::with_base_url(endpoint(&server)).expect("client");
    let mut manager = AuthManager::new(client, store);

    //* When
    manager.login("jan@example.nl", "secret").await.expect("login");
    manager.ensure_authenticated().await.expect("authenticated");

    //* Then
    // a fresh token is used as stored, so only the login reached the server
    login_mock.assert_async().await;
    assert!(manager.is_logged_in());
    assert!(manager.client().has_token());

    let saved = manager.store().load().expect("load").expect("record");
    assert_eq!(saved.auth_token, auth);
    assert_eq!(saved.refresh_token, "refresh-1");
}

#[tokio::test]
async fn expired_token_is_renewed_once() {
    //* Given
    let stale = token_expiring_in(-Duration::hours(1));
    let fresh = token_expiring_in(Duration::days(1));

    let mut server = Server::new_async().await;
    let renew_mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "RenewToken",
            "variables": { "authToken": stale, "refreshToken": "refresh-old" }
        })))
        .with_status(200)
        .with_body(
            json!({
                "data": { "renewToken": { "authToken": fresh, "refreshToken": "refresh-new" } }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let store = CredentialStore::new(dir.path().join("credentials.json"));
    store
        .save(&Credentials {
            auth_token: stale.clone(),
            refresh_token: "refresh-old".to_string(),
            expires_at: parse_expiration(&stale),
        })
        .expect("seed credentials");
    let manager = AuthManager::new(ApiClient::with_base_url(endpoint(&server)).expect("client"), store);

    //* When
    let first = manager.get_valid_token().await.expect("renewed token");
    let second = manager.get_valid_token().await.expect("stored token");

    //* Then
    renew_mock.assert_async().await;
    assert_eq!(first, fresh);
    assert_eq!(second, fresh);
    let saved = manager.store().load().expect("load").expect("record");
    assert_eq!(saved.refresh_token, "refresh-new");
}

#[tokio::test]
async fn failed_renewal_keeps_stale_record() {
    let stale = token_expiring_in(-Duration::hours(1));
    let mut server = Server::new_async().await;
    let renew_mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"data":null,"errors":[{"message":"user-error:auth-required"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let store = CredentialStore::new(dir.path().join("credentials.json"));
    let record = Credentials {
        auth_token: stale.clone(),
        refresh_token: "refresh-old".to_string(),
        expires_at: parse_expiration(&stale),
    };
    store.save(&record).expect("seed credentials");
    let manager = AuthManager::new(ApiClient::with_base_url(endpoint(&server)).expect("client"), store);

    let err = manager.get_valid_token().await.unwrap_err();

    renew_mock.assert_async().await;
    assert_eq!(err.downcast_ref::<ApiError>(), Some(&ApiError::AuthRequired));
    assert_eq!(manager.store().load().expect("load"), Some(record));
}

#[tokio::test]
async fn invalid_password_writes_nothing() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"data":null,"errors":[{"message":"user-error:password-invalid"}]}"#)
        .create_async()
        .await;
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CredentialStore::new(dir.path().join("credentials.json"));
    let manager = AuthManager::new(ApiClient::with_base_url(endpoint(&server)).expect("client"), store);

    let err = manager.login("jan@example.nl", "wrong").await.unwrap_err();
    assert_eq!(err.downcast_ref::<ApiError>(), Some(&ApiError::InvalidCredentials));
    assert!(!manager.store().exists());
}
