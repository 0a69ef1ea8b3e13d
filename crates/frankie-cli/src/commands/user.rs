use anyhow::{Context, Result};
use serde_json::json;

use frankie_core::api::queries::ME_QUERY;
use frankie_core::models::{MeResponse, User};
use frankie_core::Settings;

use super::authenticated_client;
use crate::output;

pub async fn run(settings: &Settings) -> Result<()> {
    let client = authenticated_client(settings).await?;

    let variables = settings
        .default_site
        .as_ref()
        .map(|site| json!({ "siteReference": site }));
    let response: MeResponse = client
        .query(ME_QUERY, "Me", variables)
        .await
        .context("failed to fetch user info")?;

    if settings.is_json() {
        return output::print_json(&response.me);
    }

    output::print_key_values(&user_pairs(&response.me));
    Ok(())
}

fn user_pairs(user: &User) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("Email", Some(user.email.clone())),
        ("Name", user.display_name()),
        ("Country", Some(user.country_code.clone())),
        ("Address", user.display_address()),
        ("Trees", Some(user.trees_count.to_string())),
        ("CO2 Compensation", Some(output::yes_no(user.has_co2_compensation))),
        (
            "Smart Charging",
            user.smart_charging.as_ref().map(|s| s.status_display().to_string()),
        ),
        (
            "Smart Trading",
            user.smart_trading.as_ref().map(|s| s.status_display().to_string()),
        ),
        (
            "Advanced Payment",
            user.advanced_payment_amount
                .filter(|amount| *amount > 0.0)
                .map(|amount| format!("€{:.2}", amount)),
        ),
        (
            "Member Since",
            user.created_at.map(|t| t.format("%B %Y").to_string()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_pairs() {
        let json = r#"{"me":{"id":"u1","email":"jan@example.nl","countryCode":"NL","advancedPaymentAmount":0,"treesCount":3,"hasCO2Compensation":false,"createdAt":"2021-04-01T10:00:00Z","externalDetails":null,"smartCharging":null,"smartTrading":{"isActivated":true,"isAvailableInCountry":true},"reference":null}}"#;
        let resp: MeResponse = serde_json::from_str(json).expect("parse");
        let pairs = user_pairs(&resp.me);

        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .and_then(|(_, v)| v.clone())
        };
        assert_eq!(get("Email").as_deref(), Some("jan@example.nl"));
        assert_eq!(get("Name"), None);
        assert_eq!(get("CO2 Compensation").as_deref(), Some("No"));
        assert_eq!(get("Smart Trading").as_deref(), Some("Active"));
        assert_eq!(get("Advanced Payment"), None);
        assert_eq!(get("Member Since").as_deref(), Some("April 2021"));
    }
}
