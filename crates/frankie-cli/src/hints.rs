//! Human-readable hints appended to errors before they are printed.

use frankie_core::models::SiteLookupError;
use frankie_core::{ApiError, AuthError};

const HINT_LOGIN: &str = "Run 'frankie login' to authenticate";
const HINT_CREDENTIALS: &str = "Check your credentials and try again";
const HINT_FEATURE: &str = "Enable it in the Frank Energie app";
const HINT_COUNTRY: &str = "Check the --country setting for your account";
const HINT_NETWORK: &str = "Check your internet connection";
const HINT_SERVER: &str = "Frank Energie API may be temporarily unavailable";
const HINT_SITES: &str = "Run 'frankie sites' to list your site references";

/// Fallback substring matches against the lowercased error chain
const MESSAGE_HINTS: &[(&str, &str)] = &[
    ("authentication required", HINT_LOGIN),
    ("not logged in", HINT_LOGIN),
    ("invalid credentials", HINT_CREDENTIALS),
    ("not enabled", HINT_FEATURE),
    ("not supported in this country", HINT_COUNTRY),
    ("connection refused", HINT_NETWORK),
    ("dns error", HINT_NETWORK),
    ("timed out", HINT_NETWORK),
    ("network", HINT_NETWORK),
    ("server error", HINT_SERVER),
    ("502", HINT_SERVER),
    ("503", HINT_SERVER),
];

fn hint_for_kind(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(AuthError::NotAuthenticated) = err.downcast_ref::<AuthError>() {
        return Some(HINT_LOGIN);
    }
    if err.is::<SiteLookupError>() {
        return Some(HINT_SITES);
    }
    match err.downcast_ref::<ApiError>()? {
        ApiError::AuthRequired => Some(HINT_LOGIN),
        ApiError::InvalidCredentials => Some(HINT_CREDENTIALS),
        ApiError::SmartTradingNotEnabled | ApiError::SmartChargingNotEnabled => Some(HINT_FEATURE),
        ApiError::NotSupportedInCountry => Some(HINT_COUNTRY),
        ApiError::Network(_) => Some(HINT_NETWORK),
        ApiError::ServerError(_) => Some(HINT_SERVER),
        _ => None,
    }
}

fn hint_for_message(message: &str) -> Option<&'static str> {
    let lower = message.to_lowercase();
    MESSAGE_HINTS
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map(|(_, hint)| *hint)
}

/// Format an error chain, with a hint appended when one applies
pub fn format_error(err: &anyhow::Error) -> String {
    let message = format!("{:#}", err);
    match hint_for_kind(err).or_else(|| hint_for_message(&message)) {
        Some(hint) => format!("{}\n\nHint: {}", message, hint),
        None => message,
    }
}
