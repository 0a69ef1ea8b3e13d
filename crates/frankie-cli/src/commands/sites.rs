use anyhow::{Context, Result};

use frankie_core::api::queries::USER_SITES_QUERY;
use frankie_core::models::{self, Site, UserSitesResponse};
use frankie_core::{ApiClient, Settings};

use super::authenticated_client;
use crate::output;

const HEADERS: [&str; 6] = ["Reference", "Address", "Status", "Segments", "Start", "Last Reading"];

pub async fn run(settings: &Settings) -> Result<()> {
    let client = authenticated_client(settings).await?;
    let sites = fetch_sites(&client).await?;

    if sites.is_empty() {
        println!("No sites found");
        return Ok(());
    }

    if settings.is_json() {
        return output::print_json(&sites);
    }

    let rows: Vec<Vec<String>> = sites.iter().map(site_row).collect();
    output::print_table(&HEADERS, &rows);
    Ok(())
}

/// Sites linked to the account. Needs an authenticated client.
pub async fn fetch_sites(client: &ApiClient) -> Result<Vec<Site>> {
    let response: UserSitesResponse = client
        .query(USER_SITES_QUERY, "UserSites", None)
        .await
        .context("failed to fetch sites")?;
    Ok(response.user_sites)
}

/// Expand a partial site reference against the account's sites
pub async fn resolve_site_reference(client: &ApiClient, partial: &str) -> Result<String> {
    let sites = fetch_sites(client).await?;
    Ok(models::resolve_site_reference(&sites, partial)?)
}

fn site_row(site: &Site) -> Vec<String> {
    vec![
        site.reference.clone(),
        site.display_address(),
        site.status.clone().unwrap_or_default(),
        site.display_segments(),
        site.delivery_start_date.as_deref().map(output::format_date).unwrap_or_default(),
        site.last_meter_reading_date.as_deref().map(output::format_date).unwrap_or_default(),
    ]
}
