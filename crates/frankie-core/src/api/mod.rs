//! GraphQL transport for the Frank Energie API.
//!
//! This module provides the `ApiClient` that POSTs GraphQL documents to the
//! single API endpoint, attaches the client identity headers and an optional
//! bearer token, and classifies failures into `ApiError`.

pub mod client;
pub mod error;
pub mod graphql;
pub mod queries;

pub use client::ApiClient;
pub use error::ApiError;
pub use graphql::{GraphQlError, GraphQlRequest, GraphQlResponse};
