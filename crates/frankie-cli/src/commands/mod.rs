//! Subcommand implementations. Each takes the resolved `Settings` explicitly.

pub mod api;
pub mod login;
pub mod logout;
pub mod prices;
pub mod sites;
pub mod status;
pub mod user;

use anyhow::Result;

use frankie_core::{ApiClient, AuthError, AuthManager, CredentialStore, Settings};

/// Unauthenticated client for the configured country
pub fn new_client(settings: &Settings) -> Result<ApiClient> {
    let mut client = ApiClient::new()?;
    client.set_country(settings.country);
    Ok(client)
}

pub fn new_manager(settings: &Settings) -> Result<AuthManager<ApiClient>> {
    Ok(AuthManager::new(
        new_client(settings)?,
        CredentialStore::default_location()?,
    ))
}

/// Client carrying a valid bearer token, renewing it first if needed
pub async fn authenticated_client(settings: &Settings) -> Result<ApiClient> {
    let mut manager = new_manager(settings)?;
    manager.ensure_authenticated().await.map_err(|e| {
        if e.is::<AuthError>() {
            e
        } else {
            e.context("not logged in")
        }
    })?;
    Ok(manager.into_client())
}
