use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, Utc};
use serde::Serialize;

use frankie_core::auth::{email_from_token, is_expired, parse_expiration, parse_issued_at};
use frankie_core::{CredentialStore, Settings};

use crate::output;

#[derive(Debug, Serialize, PartialEq)]
pub struct StatusInfo {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_issued: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expiry: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub token_expired: bool,
}

impl StatusInfo {
    fn from_token(auth_token: &str) -> Self {
        let expired = is_expired(auth_token, Duration::zero());
        Self {
            logged_in: !expired,
            email: email_from_token(auth_token),
            token_issued: parse_issued_at(auth_token),
            token_expiry: parse_expiration(auth_token),
            token_expired: expired,
        }
    }
}

/// Show login state from the stored credentials. Never touches the network.
pub fn run(settings: &Settings) -> Result<()> {
    let store = CredentialStore::default_location()?;
    let creds = store.load().context("failed to load credentials")?;

    let Some(creds) = creds else {
        if settings.is_json() {
            return output::print_json(&StatusInfo {
                logged_in: false,
                email: None,
                token_issued: None,
                token_expiry: None,
                token_expired: false,
            });
        }
        println!("Not logged in");
        println!();
        println!("Credentials file: {}", store.path().display());
        println!();
        println!("Run 'frankie login' to authenticate.");
        return Ok(());
    };

    let info = StatusInfo::from_token(&creds.auth_token);
    if settings.is_json() {
        return output::print_json(&info);
    }

    if info.token_expired {
        println!("Session expired");
        println!();
        println!("Run 'frankie login' to authenticate.");
        return Ok(());
    }

    println!("Logged in");
    println!();
    output::print_key_values(&[
        ("Email", info.email.clone()),
        ("Token", info.token_expiry.map(|exp| format_time_remaining(exp, Utc::now()))),
        ("Issued", info.token_issued.map(format_local)),
        ("Expiry", info.token_expiry.map(format_local)),
    ]);
    Ok(())
}

fn format_local(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Human-readable time until expiry
pub fn format_time_remaining(expiry: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = expiry - now;
    if remaining <= Duration::zero() {
        return "expired".to_string();
    }

    let hours = remaining.num_seconds() as f64 / 3600.0;
    if hours >= 24.0 {
        let days = remaining.num_days();
        return if days == 1 {
            "expires in 1 day".to_string()
        } else {
            format!("expires in {} days", days)
        };
    }
    if hours >= 1.0 {
        return format!("expires in {:.1} hours", hours);
    }

    match remaining.num_minutes() {
        1 => "expires in 1 minute".to_string(),
        minutes => format!("expires in {} minutes", minutes),
    }
}
