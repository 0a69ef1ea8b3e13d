use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub me: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "countryCode", default)]
    pub country_code: String,
    #[serde(rename = "advancedPaymentAmount", default)]
    pub advanced_payment_amount: Option<f64>,
    #[serde(rename = "treesCount", default)]
    pub trees_count: i64,
    #[serde(rename = "hasCO2Compensation", default)]
    pub has_co2_compensation: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "externalDetails")]
    pub external_details: Option<ExternalDetails>,
    #[serde(rename = "smartCharging")]
    pub smart_charging: Option<SmartCharging>,
    #[serde(rename = "smartTrading")]
    pub smart_trading: Option<SmartTrading>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalDetails {
    pub reference: Option<String>,
    pub person: Option<Person>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

impl Person {
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{} {}", first, last).trim().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "addressFormatted", default)]
    pub address_formatted: Vec<String>,
    pub street: Option<String>,
    #[serde(rename = "houseNumber")]
    pub house_number: Option<String>,
    #[serde(rename = "houseNumberAddition")]
    pub house_number_addition: Option<String>,
    #[serde(rename = "zipCode")]
    pub zip_code: Option<String>,
    pub city: Option<String>,
}

impl Address {
    /// First line of the server-formatted address, or empty
    pub fn formatted(&self) -> String {
        self.address_formatted.first().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartCharging {
    #[serde(rename = "isActivated", default)]
    pub is_activated: bool,
    pub provider: Option<String>,
    #[serde(rename = "isAvailableInCountry", default)]
    pub is_available_in_country: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartTrading {
    #[serde(rename = "isActivated", default)]
    pub is_activated: bool,
    #[serde(rename = "isAvailableInCountry", default)]
    pub is_available_in_country: bool,
}

/// Display label shared by the smart charging and smart trading features
pub fn feature_status(activated: bool, available: bool) -> &'static str {
    if activated {
        "Active"
    } else if available {
        "Available"
    } else {
        "Not available"
    }
}

impl SmartCharging {
    pub fn status_display(&self) -> &'static str {
        feature_status(self.is_activated, self.is_available_in_country)
    }
}

impl SmartTrading {
    pub fn status_display(&self) -> &'static str {
        feature_status(self.is_activated, self.is_available_in_country)
    }
}

impl User {
    pub fn display_name(&self) -> Option<String> {
        self.external_details
            .as_ref()
            .and_then(|d| d.person.as_ref())
            .map(Person::full_name)
            .filter(|name| !name.is_empty())
    }

    pub fn display_address(&self) -> Option<String> {
        self.external_details
            .as_ref()
            .and_then(|d| d.address.as_ref())
            .map(Address::formatted)
            .filter(|addr| !addr.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_me_response() {
        let json = r#"{"me":{"id":"u1","email":"jan@example.nl","countryCode":"NL","advancedPaymentAmount":112.5,"treesCount":3,"hasCO2Compensation":true,"createdAt":"2021-04-01T10:00:00.000Z","externalDetails":{"reference":"R1","person":{"firstName":"Jan","lastName":"Jansen"},"address":{"addressFormatted":["Straat 1, 1234 AB Plaats"],"street":"Straat","houseNumber":"1","houseNumberAddition":null,"zipCode":"1234 AB","city":"Plaats"}},"smartCharging":{"isActivated":false,"provider":null,"isAvailableInCountry":true},"smartTrading":null,"reference":"R1"}}"#;

        let resp: MeResponse = serde_json::from_str(json).expect("parse me response");
        let user = resp.me;
        assert_eq!(user.email, "jan@example.nl");
        assert_eq!(user.display_name().as_deref(), Some("Jan Jansen"));
        assert_eq!(user.display_address().as_deref(), Some("Straat 1, 1234 AB Plaats"));
        assert_eq!(
            user.smart_charging.as_ref().map(SmartCharging::status_display),
            Some("Available")
        );
        assert!(user.smart_trading.is_none());
    }

    #[test]
    fn test_feature_status() {
        assert_eq!(feature_status(true, false), "Active");
        assert_eq!(feature_status(false, true), "Available");
        assert_eq!(feature_status(false, false), "Not available");
    }
}
