use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::TokenPair;

use super::credentials::{CredentialStore, Credentials};
use super::token;

/// Buffer before expiry at which a token is renewed (5 minutes)
pub const TOKEN_REFRESH_MARGIN_MINUTES: i64 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("not logged in")]
    NotAuthenticated,
}

/// The transport operations the auth manager depends on
#[async_trait]
pub trait TokenApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair>;

    async fn renew_token(&self, auth_token: &str, refresh_token: &str) -> Result<TokenPair>;

    /// Attach a bearer token to subsequent requests
    fn set_token(&mut self, token: String);
}

/// Drives login, expiry checks and token renewal against a credential store.
pub struct AuthManager<C> {
    client: C,
    store: CredentialStore,
}

impl<C: TokenApi> AuthManager<C> {
    pub fn new(client: C, store: CredentialStore) -> Self {
        Self { client, store }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_client(self) -> C {
        self.client
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    fn refresh_margin() -> Duration {
        Duration::minutes(TOKEN_REFRESH_MARGIN_MINUTES)
    }

    /// Authenticate with email and password and persist the new token pair.
    /// Nothing is written if the login call fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let pair = self
            .client
            .login(email, password)
            .await
            .context("login failed")?;

        self.persist(pair).context("failed to save credentials")?;
        info!("Login successful");
        Ok(())
    }

    /// Clear stored credentials
    pub fn logout(&self) -> Result<()> {
        self.store.delete()
    }

    /// Return a usable auth token, renewing it once if it has expired or is
    /// within the refresh margin. A failed renewal leaves the stored record
    /// untouched.
    pub async fn get_valid_token(&self) -> Result<String> {
        let creds = self.store.load()?.ok_or(AuthError::NotAuthenticated)?;

        if !token::is_expired(&creds.auth_token, Self::refresh_margin()) {
            debug!("Stored token is valid");
            return Ok(creds.auth_token);
        }

        debug!("Stored token expired or expiring soon, renewing");
        let renewed = self
            .refresh(&creds)
            .await
            .context("token refresh failed")?;
        Ok(renewed.auth_token)
    }

    /// Renew the token pair and persist the result
    pub async fn refresh(&self, creds: &Credentials) -> Result<Credentials> {
        let pair = self
            .client
            .renew_token(&creds.auth_token, &creds.refresh_token)
            .await
            .inspect_err(|e| warn!(error = %e, "Token renewal failed"))?;

        self.persist(pair)
            .context("failed to save refreshed credentials")
    }

    /// Load a valid token and attach it to the client. On failure the client
    /// is left as it was.
    pub async fn ensure_authenticated(&mut self) -> Result<()> {
        let token = self.get_valid_token().await?;
        self.client.set_token(token);
        Ok(())
    }

    /// True if credentials exist and the token has not expired
    pub fn is_logged_in(&self) -> bool {
        match self.store.load() {
            Ok(Some(creds)) => !token::is_expired(&creds.auth_token, Duration::zero()),
            _ => false,
        }
    }

    fn persist(&self, pair: TokenPair) -> Result<Credentials> {
        let creds = Credentials {
            expires_at: token::parse_expiration(&pair.auth_token),
            auth_token: pair.auth_token,
            refresh_token: pair.refresh_token,
        };
        self.store.save(&creds)?;
        Ok(creds)
    }
}
