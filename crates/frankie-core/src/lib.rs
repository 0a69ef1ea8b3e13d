//! Core library for frankie, a command-line client for the Frank Energie
//! GraphQL API.
//!
//! - `api`: GraphQL transport and error classification
//! - `auth`: token decoding, credential persistence and renewal
//! - `config`: configuration file and per-invocation settings
//! - `models`: typed API responses

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthError, AuthManager, CredentialStore, Credentials};
pub use config::{Config, Country, OutputFormat, Settings};
