//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: non-2xx HTTP responses from the API
//! - [`HttpError`]: unified error type for all HTTP failures
//!
//! There is no retry error: every request is attempted exactly once and the
//! first failure aborts the export.

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message is a JSON object holding whichever of `errors`, `error`,
/// `error_description` the upstream body carried, plus an
/// `error_reference` with the `X-Request-Id` when present.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 401,
///     message: r#"{"errors":"[API] Invalid API key or access token"}"#.to_string(),
///     error_reference: None,
/// };
///
/// assert!(error.to_string().contains("Invalid API key"));
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_displays_message() {
        let error = HttpResponseError {
            code: 404,
            message: r#"{"errors":"Not Found"}"#.to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), r#"{"errors":"Not Found"}"#);
    }

    #[test]
    fn test_http_error_is_transparent_over_response_error() {
        let error: HttpError = HttpResponseError {
            code: 500,
            message: "boom".to_string(),
            error_reference: Some("abc-123".to_string()),
        }
        .into();
        assert_eq!(error.to_string(), "boom");
        assert!(matches!(error, HttpError::Response(e) if e.code == 500));
    }
}
