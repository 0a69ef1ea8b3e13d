//! GraphQL client for the Frank Energie API.
//!
//! Every call is a POST of `{query, operationName, variables}` to a single
//! endpoint. HTTP status codes and GraphQL `errors` arrays are classified
//! into `ApiError` before the response reaches the caller.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::auth::TokenApi;
use crate::config::Country;
use crate::models::{LoginResponse, RenewTokenResponse, TokenPair};

use super::queries::{LOGIN_MUTATION, RENEW_TOKEN_MUTATION};
use super::{ApiError, GraphQlRequest, GraphQlResponse};

// ============================================================================
// Constants
// ============================================================================

/// GraphQL endpoint
pub const DEFAULT_URL: &str = "https://graphql.frankenergie.nl/";

/// HTTP request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client identity sent with every request
pub const CLIENT_VERSION: &str = "4.13.3";
pub const CLIENT_NAME: &str = "frank-app";
pub const CLIENT_OS: &str = "ios/26.0.1";

const HEADER_CLIENT_VERSION: &str = "x-graphql-client-version";
const HEADER_CLIENT_NAME: &str = "x-graphql-client-name";
const HEADER_CLIENT_OS: &str = "x-graphql-client-os";
const HEADER_SKIP_CACHE: &str = "skip-graphcdn";
const HEADER_COUNTRY: &str = "x-country";

/// API client for Frank Energie.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    country: Country,
}

impl ApiClient {
    /// Create a new API client against the production endpoint
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client with a custom per-request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
            country: Country::default(),
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_country(&mut self, country: Country) {
        self.country = country;
    }

    fn headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        headers.insert(HEADER_CLIENT_VERSION, header::HeaderValue::from_static(CLIENT_VERSION));
        headers.insert(HEADER_CLIENT_NAME, header::HeaderValue::from_static(CLIENT_NAME));
        headers.insert(HEADER_CLIENT_OS, header::HeaderValue::from_static(CLIENT_OS));
        headers.insert(HEADER_SKIP_CACHE, header::HeaderValue::from_static("1"));

        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))
                    .context("Bearer token contains invalid header characters")?,
            );
        }
        if let Some(country) = self.country.header_value() {
            headers.insert(HEADER_COUNTRY, header::HeaderValue::from_static(country));
        }
        Ok(headers)
    }

    fn build_request(
        &self,
        query: &str,
        operation_name: &str,
        variables: Option<&Value>,
    ) -> Result<reqwest::Request> {
        let body = GraphQlRequest {
            query,
            operation_name,
            variables,
        };
        self.client
            .post(&self.base_url)
            .headers(self.headers()?)
            .json(&body)
            .build()
            .context("Failed to build GraphQL request")
    }

    /// Send a request and return the raw response body.
    /// Status codes with a known meaning are turned into errors here.
    async fn send(
        &self,
        query: &str,
        operation_name: &str,
        variables: Option<&Value>,
    ) -> Result<String> {
        let request = self.build_request(query, operation_name, variables)?;
        debug!(operation = operation_name, authenticated = self.token.is_some(), "Sending GraphQL request");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;
        debug!(operation = operation_name, status, "GraphQL response received");

        if let Some(err) = ApiError::from_status(status) {
            warn!(operation = operation_name, status, "Request failed");
            return Err(err.into());
        }
        Ok(body)
    }

    /// Execute a GraphQL document and classify any GraphQL-level errors
    pub async fn execute(
        &self,
        query: &str,
        operation_name: &str,
        variables: Option<Value>,
    ) -> Result<GraphQlResponse> {
        let body = self.send(query, operation_name, variables.as_ref()).await?;
        Ok(parse_response(&body)?)
    }

    /// Execute and deserialize the `data` object
    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        operation_name: &str,
        variables: Option<Value>,
    ) -> Result<T> {
        let response = self.execute(query, operation_name, variables).await?;
        Ok(response.data()?)
    }

    /// Execute a GraphQL document and return the whole response body.
    /// GraphQL errors are left in the body for the caller to inspect.
    pub async fn execute_raw(
        &self,
        query: &str,
        operation_name: &str,
        variables: Option<Value>,
    ) -> Result<Value> {
        let body = self.send(query, operation_name, variables.as_ref()).await?;
        serde_json::from_str(&body).map_err(|e| {
            anyhow::Error::from(ApiError::InvalidResponse(format!(
                "{}: {}",
                e,
                ApiError::truncate_body(&body)
            )))
        })
    }

    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let variables = json!({ "email": email, "password": password });
        let response: LoginResponse = self.query(LOGIN_MUTATION, "Login", Some(variables)).await?;
        validate_pair(response.login)
    }

    /// Exchange the current token pair for a new one
    pub async fn renew_token(&self, auth_token: &str, refresh_token: &str) -> Result<TokenPair> {
        let variables = json!({ "authToken": auth_token, "refreshToken": refresh_token });
        let response: RenewTokenResponse = self
            .query(RENEW_TOKEN_MUTATION, "RenewToken", Some(variables))
            .await?;
        validate_pair(response.renew_token)
    }
}

/// Parse a GraphQL envelope, returning the first classified error if the
/// `errors` array is non-empty.
pub fn parse_response(body: &str) -> Result<GraphQlResponse, ApiError> {
    let response: GraphQlResponse = serde_json::from_str(body).map_err(|e| {
        ApiError::InvalidResponse(format!("{}: {}", e, ApiError::truncate_body(body)))
    })?;

    if let Some(err) = ApiError::from_graphql_errors(&response.errors) {
        if response.errors.len() > 1 {
            debug!(count = response.errors.len(), "Multiple GraphQL errors, classifying the first");
        }
        return Err(err);
    }
    Ok(response)
}

fn validate_pair(pair: TokenPair) -> Result<TokenPair> {
    if pair.auth_token.is_empty() {
        return Err(ApiError::InvalidResponse("response did not contain an auth token".to_string()).into());
    }
    Ok(pair)
}

#[async_trait]
impl TokenApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        ApiClient::login(self, email, password).await
    }

    async fn renew_token(&self, auth_token: &str, refresh_token: &str) -> Result<TokenPair> {
        ApiClient::renew_token(self, auth_token, refresh_token).await
    }

    fn set_token(&mut self, token: String) {
        ApiClient::set_token(self, token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(request: &'a reqwest::Request, name: &str) -> Option<&'a str> {
        request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_request_headers_unauthenticated() {
        let client = ApiClient::new().expect("client");
        let request = client
            .build_request("query Version { version }", "Version", None)
            .expect("request");

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), DEFAULT_URL);
        assert_eq!(header(&request, "content-type"), Some("application/json"));
        assert_eq!(header(&request, "accept"), Some("application/json"));
        assert_eq!(header(&request, HEADER_CLIENT_VERSION), Some(CLIENT_VERSION));
        assert_eq!(header(&request, HEADER_CLIENT_NAME), Some(CLIENT_NAME));
        assert_eq!(header(&request, HEADER_CLIENT_OS), Some(CLIENT_OS));
        assert_eq!(header(&request, HEADER_SKIP_CACHE), Some("1"));
        assert!(request.headers().get("authorization").is_none());
        assert!(request.headers().get(HEADER_COUNTRY).is_none());
    }

    #[test]
    fn test_request_headers_authenticated_belgium() {
        let mut client = ApiClient::new().expect("client");
        client.set_token("abc.def.ghi".to_string());
        client.set_country(Country::Belgium);
        let request = client
            .build_request("query Me { me { email } }", "Me", None)
            .expect("request");

        assert_eq!(header(&request, "authorization"), Some("Bearer abc.def.ghi"));
        assert_eq!(header(&request, HEADER_COUNTRY), Some("BE"));
    }

    #[test]
    fn test_request_body() {
        let client = ApiClient::new().expect("client");
        let variables = json!({ "date": "2025-01-28" });
        let request = client
            .build_request("query Prices { x }", "Prices", Some(&variables))
            .expect("request");

        let bytes = request.body().and_then(|b| b.as_bytes()).expect("body bytes");
        let body: Value = serde_json::from_slice(bytes).expect("json body");
        assert_eq!(body["query"], "query Prices { x }");
        assert_eq!(body["operationName"], "Prices");
        assert_eq!(body["variables"]["date"], "2025-01-28");

        let request = client.build_request("query V { version }", "V", None).expect("request");
        let bytes = request.body().and_then(|b| b.as_bytes()).expect("body bytes");
        let body: Value = serde_json::from_slice(bytes).expect("json body");
        assert!(body.get("variables").is_none());
    }

    #[test]
    fn test_auth_required_on_success_status() {
        let body = r#"{"data":null,"errors":[{"message":"user-error:auth-required","path":["me"]}]}"#;
        assert_eq!(parse_response(body).unwrap_err(), ApiError::AuthRequired);
    }

    #[test]
    fn test_parse_response_success() {
        let body = r#"{"data":{"version":"1.0"}}"#;
        let response = parse_response(body).expect("success");
        assert!(response.errors.is_empty());
        assert_eq!(response.data["version"], "1.0");
    }

    #[test]
    fn test_parse_response_not_json() {
        let err = parse_response("<html>gateway</html>").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_login_data() {
        let body = r#"{"data":{"login":{"authToken":"a.b.c","refreshToken":"r","__typename":"AuthResponse"},"version":"5","__typename":"Mutation"}}"#;
        let response = parse_response(body).expect("success");
        let login: LoginResponse = response.data().expect("login data");
        assert_eq!(login.login.auth_token, "a.b.c");
        assert_eq!(login.login.refresh_token, "r");
    }

    #[test]
    fn test_validate_pair_rejects_empty_token() {
        let pair = TokenPair {
            auth_token: String::new(),
            refresh_token: "r".to_string(),
        };
        let err = validate_pair(pair).unwrap_err();
        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::InvalidResponse(_))));
    }
}
