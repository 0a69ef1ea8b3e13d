use serde::{Deserialize, Serialize};

/// Token pair issued by a single login or renewal call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub login: TokenPair,
}

#[derive(Debug, Deserialize)]
pub struct RenewTokenResponse {
    #[serde(rename = "renewToken")]
    pub renew_token: TokenPair,
}
