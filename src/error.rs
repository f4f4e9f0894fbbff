//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that
//! malformed credentials are rejected before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use shopify_catalog_export::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building an export configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Admin API access token.")]
    EmptyAccessToken,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-10') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// API base URL is invalid.
    #[error("Invalid API base URL '{url}'. Please provide a URL with scheme (e.g., 'http://127.0.0.1:8080').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_access_token_error_message() {
        let message = ConfigError::EmptyAccessToken.to_string();
        assert!(message.contains("Access token cannot be empty"));
    }

    #[test]
    fn test_invalid_shop_domain_error_message() {
        let error = ConfigError::InvalidShopDomain {
            domain: "bad domain!".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("bad domain!"));
        assert!(message.contains("Expected format"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "shop_domain",
        };
        let message = error.to_string();
        assert!(message.contains("shop_domain"));
        assert!(message.contains("must be set"));
    }
}
