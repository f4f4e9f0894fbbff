//! Configuration types for catalog exports.
//!
//! # Overview
//!
//! - [`ExportConfig`]: everything one export needs to talk to the Admin API
//! - [`ExportConfigBuilder`]: builder for [`ExportConfig`]
//! - [`Credentials`]: raw `SHOP_DOMAIN` / `SHOP_TOKEN` values gathered from
//!   the environment or a request, before validation
//! - [`ShopDomain`], [`AccessToken`], [`ApiBaseUrl`]: validated newtypes
//! - [`ApiVersion`]: the Admin API version to query
//!
//! Credentials are resolved once at the entry point and handed to the core as
//! an [`ExportConfig`]; nothing below this layer reads process-wide state.
//!
//! # Example
//!
//! ```rust
//! use shopify_catalog_export::{AccessToken, ApiVersion, ExportConfig, ShopDomain};
//!
//! let config = ExportConfig::builder()
//!     .shop_domain(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_version(), &ApiVersion::V2024_10);
//! ```

mod credentials;
mod newtypes;
mod version;

pub use credentials::Credentials;
pub use newtypes::{AccessToken, ApiBaseUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Configuration for one export run.
///
/// `ExportConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ExportConfig {
    shop_domain: ShopDomain,
    access_token: AccessToken,
    api_version: ApiVersion,
    api_base_url: Option<ApiBaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ExportConfig {
    /// Creates a new builder for constructing an `ExportConfig`.
    #[must_use]
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop_domain(&self) -> &ShopDomain {
        &self.shop_domain
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the upstream origin override, if configured.
    #[must_use]
    pub const fn api_base_url(&self) -> Option<&ApiBaseUrl> {
        self.api_base_url.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ExportConfig>();
};

/// Builder for constructing [`ExportConfig`] instances.
///
/// Required fields are `shop_domain` and `access_token`.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::V2024_10`]
/// - `api_base_url`: `None` (requests go to `https://<shop-domain>`)
/// - `user_agent_prefix`: `None`
///
/// The builder is `Clone` so that an entry point can prepare the shared
/// settings once and add per-request credentials to a copy.
#[derive(Clone, Debug, Default)]
pub struct ExportConfigBuilder {
    shop_domain: Option<ShopDomain>,
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    api_base_url: Option<ApiBaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ExportConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop_domain(mut self, domain: ShopDomain) -> Self {
        self.shop_domain = Some(domain);
        self
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sends requests to another origin instead of `https://<shop-domain>`.
    #[must_use]
    pub fn api_base_url(mut self, url: ApiBaseUrl) -> Self {
        self.api_base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for upstream requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Validates and applies raw credentials.
    ///
    /// Absent values leave the corresponding field unset, so [`build`]
    /// reports them as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] or
    /// [`ConfigError::EmptyAccessToken`] for malformed values.
    ///
    /// [`build`]: Self::build
    pub fn credentials(mut self, credentials: &Credentials) -> Result<Self, ConfigError> {
        if let Some(domain) = credentials.shop_domain() {
            self.shop_domain = Some(ShopDomain::new(domain)?);
        }
        if let Some(token) = credentials.shop_token() {
            self.access_token = Some(AccessToken::new(token)?);
        }
        Ok(self)
    }

    /// Builds the [`ExportConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop_domain` or
    /// `access_token` are not set.
    pub fn build(self) -> Result<ExportConfig, ConfigError> {
        let shop_domain = self.shop_domain.ok_or(ConfigError::MissingRequiredField {
            field: "shop_domain",
        })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        Ok(ExportConfig {
            shop_domain,
            access_token,
            api_version: self.api_version.unwrap_or_default(),
            api_base_url: self.api_base_url,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
