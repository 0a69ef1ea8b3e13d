//! Data models for Frank Energie API responses.
//!
//! - `TokenPair`: auth/refresh tokens issued by login and renewal
//! - `User`: the `me` query, with account and feature details
//! - `Site`: delivery addresses linked to the account
//! - `MarketPrices`: day-ahead electricity and gas prices

pub mod auth;
pub mod prices;
pub mod site;
pub mod user;

pub use auth::{LoginResponse, RenewTokenResponse, TokenPair};
pub use prices::{AveragePrice, CustomerMarketPricesResponse, MarketPrices, MarketPricesResponse, Price};
pub use site::{resolve_site_reference, Site, SiteAddress, SiteLookupError, UserSitesResponse};
pub use user::{Address, ExternalDetails, MeResponse, Person, SmartCharging, SmartTrading, User};
