//! Authentication module for managing the token lifecycle.
//!
//! This module provides:
//! - `token`: read-only decoding of token expiry (no signature verification)
//! - `CredentialStore`: the persisted auth/refresh token pair
//! - `AuthManager`: login, expiry checks and single-attempt renewal
//!
//! Tokens are renewed when they are within 5 minutes of expiring.

pub mod credentials;
pub mod manager;
pub mod token;

pub use credentials::{CredentialStore, Credentials};
pub use manager::{AuthError, AuthManager, TokenApi, TOKEN_REFRESH_MARGIN_MINUTES};
pub use token::{email_from_token, is_expired, parse_expiration, parse_issued_at, TokenClaims};
