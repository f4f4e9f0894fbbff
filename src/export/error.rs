//! Export error taxonomy.
//!
//! | Variant               | Class                  | HTTP |
//! |-----------------------|------------------------|------|
//! | `MissingCredentials`  | user/config error      | 400  |
//! | `Config`              | user/config error      | 400  |
//! | `BadUpstreamResponse` | upstream contract      | 500  |
//! | `GraphQlErrors`       | upstream contract      | 500  |
//! | `Upstream`, `Csv`, `Io` | unclassified failure | 500  |
//!
//! Every variant aborts the whole export; no partial CSV is produced.

use thiserror::Error;

use crate::clients::{GraphqlError, HttpError};
use crate::error::ConfigError;

/// Errors that abort an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// `SHOP_DOMAIN` or `SHOP_TOKEN` was not provided.
    #[error("Missing SHOP_DOMAIN or SHOP_TOKEN environment variables.")]
    MissingCredentials,

    /// A credential was provided but is malformed.
    #[error(transparent)]
    Config(ConfigError),

    /// The response lacked the expected `data.products` shape.
    #[error("Unexpected response from Shopify GraphQL: {body}")]
    BadUpstreamResponse {
        /// The offending response body, JSON-encoded.
        body: String,
    },

    /// The response carried a top-level `errors` array.
    #[error("Shopify GraphQL returned errors: {errors}")]
    GraphQlErrors {
        /// The `errors` member, JSON-encoded.
        errors: String,
    },

    /// Transport failure talking to the Admin API.
    #[error(transparent)]
    Upstream(#[from] GraphqlError),

    /// CSV serialization failed (including rows whose width differs from the
    /// header).
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Returns the HTTP status code this error is surfaced as.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingCredentials | Self::Config(_) => 400,
            _ => 500,
        }
    }
}

impl From<ConfigError> for ExportError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::MissingRequiredField { .. } => Self::MissingCredentials,
            other => Self::Config(other),
        }
    }
}

impl From<HttpError> for ExportError {
    fn from(error: HttpError) -> Self {
        Self::Upstream(GraphqlError::Http(error))
    }
}
