use thiserror::Error;

use super::GraphQlError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("authentication required")]
    AuthRequired,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("forbidden")]
    Forbidden,

    #[error("bad request")]
    BadRequest,

    #[error("server error (HTTP {0})")]
    ServerError(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("smart trading is not enabled for this user")]
    SmartTradingNotEnabled,

    #[error("smart charging is not enabled for this user")]
    SmartChargingNotEnabled,

    #[error("request not supported in this country")]
    NotSupportedInCountry,

    #[error("{message}")]
    Api { message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// GraphQL error codes the API reports in `errors[].message`.
const GRAPHQL_ERROR_CODES: &[(&str, ApiError)] = &[
    ("user-error:password-invalid", ApiError::InvalidCredentials),
    ("user-error:auth-not-authorised", ApiError::Forbidden),
    ("user-error:auth-required", ApiError::AuthRequired),
    ("user-error:smart-trading-not-enabled", ApiError::SmartTradingNotEnabled),
    ("user-error:smart-charging-not-enabled", ApiError::SmartChargingNotEnabled),
    ("request-error:request-not-supported-in-country", ApiError::NotSupportedInCountry),
];

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total bytes)", cut, body.len())
        }
    }

    /// Classify an HTTP status. Returns `None` when the body should be
    /// inspected as a GraphQL envelope instead.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(ApiError::BadRequest),
            401 => Some(ApiError::AuthRequired),
            403 => Some(ApiError::Forbidden),
            s if s >= 500 => Some(ApiError::ServerError(s)),
            _ => None,
        }
    }

    /// Map a single GraphQL error message to an error kind.
    pub fn from_graphql_message(message: &str) -> Self {
        GRAPHQL_ERROR_CODES
            .iter()
            .find(|(code, _)| *code == message)
            .map(|(_, kind)| kind.clone())
            .unwrap_or_else(|| ApiError::Api {
                message: message.to_string(),
            })
    }

    /// Classify a GraphQL `errors` array. Only the first entry is considered.
    pub fn from_graphql_errors(errors: &[GraphQlError]) -> Option<Self> {
        errors
            .first()
            .map(|first| Self::from_graphql_message(&first.message))
    }

    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network(format!("connection failed: {}", err))
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
