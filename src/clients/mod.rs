//! HTTP client types for Admin API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: async HTTP client carrying the shop's base URI and
//!   access token
//! - [`HttpRequest`]: a JSON POST request
//! - [`HttpResponse`]: a parsed response
//! - [`graphql::GraphqlClient`]: GraphQL client for the Admin API
//!
//! # Retry Behavior
//!
//! None. Each request is attempted once; the first failure aborts the export
//! and the caller re-invokes to retry.

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use graphql::{GraphqlClient, GraphqlError};
