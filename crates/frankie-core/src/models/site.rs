use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct UserSitesResponse {
    #[serde(rename = "userSites", default)]
    pub user_sites: Vec<Site>,
}

/// A delivery address linked to the account, identified by its site reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub address: Option<SiteAddress>,
    #[serde(rename = "addressHasMultipleSites", default)]
    pub address_has_multiple_sites: bool,
    #[serde(rename = "deliveryStartDate")]
    pub delivery_start_date: Option<String>,
    #[serde(rename = "deliveryEndDate")]
    pub delivery_end_date: Option<String>,
    #[serde(rename = "firstMeterReadingDate")]
    pub first_meter_reading_date: Option<String>,
    #[serde(rename = "lastMeterReadingDate")]
    pub last_meter_reading_date: Option<String>,
    #[serde(rename = "propositionType")]
    pub proposition_type: Option<String>,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub segments: Vec<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteAddress {
    #[serde(rename = "addressFormatted", default)]
    pub address_formatted: Vec<String>,
}

impl Site {
    pub fn display_address(&self) -> String {
        self.address
            .as_ref()
            .and_then(|a| a.address_formatted.first().cloned())
            .unwrap_or_default()
    }

    pub fn display_segments(&self) -> String {
        self.segments.join(", ")
    }
}

/// Why a site reference could not be resolved
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteLookupError {
    #[error("no sites found")]
    NoSites,
    #[error("ambiguous site reference '{reference}' matches {count} sites")]
    Ambiguous { reference: String, count: usize },
    #[error("no site found matching '{0}'")]
    NotFound(String),
}

/// Resolve a possibly partial site reference, such as a postal code or
/// postal code with house number, to a full reference.
///
/// Matching is case-insensitive: an exact match wins, then a single prefix
/// match. With no match at all, an account with only one site resolves to it.
pub fn resolve_site_reference(sites: &[Site], partial: &str) -> Result<String, SiteLookupError> {
    if sites.is_empty() {
        return Err(SiteLookupError::NoSites);
    }

    let wanted = partial.trim().to_uppercase();
    if let Some(site) = sites.iter().find(|s| s.reference.to_uppercase() == wanted) {
        return Ok(site.reference.clone());
    }

    let matches: Vec<&Site> = sites
        .iter()
        .filter(|s| s.reference.to_uppercase().starts_with(&wanted))
        .collect();
    match matches.as_slice() {
        [site] => Ok(site.reference.clone()),
        [] if sites.len() == 1 => Ok(sites[0].reference.clone()),
        [] => Err(SiteLookupError::NotFound(wanted)),
        _ => Err(SiteLookupError::Ambiguous {
            reference: wanted,
            count: matches.len(),
        }),
    }
}
