//! GraphQL client error types.
//!
//! Only transport-level failures are errors here. GraphQL-level errors come
//! back with HTTP 200 in the response body's `errors` field; the export layer
//! inspects them (see [`crate::export::ExportError::GraphQlErrors`]).

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for GraphQL API operations.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::clients::graphql::GraphqlError;
/// use shopify_catalog_export::clients::{HttpError, HttpResponseError};
///
/// let http_error = HttpError::Response(HttpResponseError {
///     code: 401,
///     message: r#"{"errors":"Unauthorized"}"#.to_string(),
///     error_reference: None,
/// });
/// let graphql_error: GraphqlError = http_error.into();
/// assert!(graphql_error.to_string().contains("Unauthorized"));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred (network failure or non-2xx response).
    #[error(transparent)]
    Http(#[from] HttpError),
}
