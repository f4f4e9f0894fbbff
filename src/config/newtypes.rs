//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction so that a bad
//! `SHOP_DOMAIN` or an empty `SHOP_TOKEN` is rejected before any request is
//! sent upstream.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated Admin API access token.
///
/// The `Debug` implementation masks the token so that it never ends up in
/// logs.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::AccessToken;
///
/// let token = AccessToken::new("shpat_123").unwrap();
/// assert_eq!(token.as_ref(), "shpat_123");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty or
    /// only whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token.to_string()))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated shop domain.
///
/// # Accepted Formats
///
/// - `shop-name` - normalized to `shop-name.myshopify.com`
/// - `shop-name.myshopify.com` - used as-is
/// - any other host name (custom domains), optionally written with an
///   `https://` prefix or a trailing slash
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::ShopDomain;
///
/// let domain = ShopDomain::new("my-store").unwrap();
/// assert_eq!(domain.as_ref(), "my-store.myshopify.com");
/// assert_eq!(domain.shop_name(), "my-store");
///
/// let domain = ShopDomain::new("https://My-Store.myshopify.com/").unwrap();
/// assert_eq!(domain.as_ref(), "my-store.myshopify.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain {
    full_domain: String,
    shop_name_end: usize,
}

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if the domain is invalid.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into();
        let domain = domain.trim().to_lowercase();
        let domain = domain
            .strip_prefix("https://")
            .or_else(|| domain.strip_prefix("http://"))
            .unwrap_or(&domain)
            .trim_end_matches('/')
            .to_string();

        if domain.is_empty() {
            return Err(ConfigError::InvalidShopDomain { domain });
        }

        let full_domain = if domain.contains('.') {
            domain
        } else {
            format!("{domain}{}", Self::SUFFIX)
        };

        if !full_domain.split('.').all(Self::is_valid_label) {
            return Err(ConfigError::InvalidShopDomain {
                domain: full_domain,
            });
        }

        let shop_name_end = full_domain
            .strip_suffix(Self::SUFFIX)
            .map_or_else(|| full_domain.find('.').unwrap_or(full_domain.len()), str::len);

        Ok(Self {
            full_domain,
            shop_name_end,
        })
    }

    /// Returns the shop name portion of the domain.
    ///
    /// For `my-store.myshopify.com`, this returns `my-store`. For a custom
    /// domain it returns the first label.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.full_domain[..self.shop_name_end]
    }

    fn is_valid_label(label: &str) -> bool {
        if label.is_empty() || label.starts_with('-') || label.ends_with('-') {
            return false;
        }

        label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_domain)
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// An override for the upstream API origin.
///
/// Normally requests go to `https://<shop-domain>`. Setting a base URL sends
/// them to another origin instead (a proxy, or a mock server in tests). The
/// shop domain is still sent in the `Host` header.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::ApiBaseUrl;
///
/// let url = ApiBaseUrl::new("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(url.as_ref(), "http://127.0.0.1:8080");
/// assert_eq!(url.scheme(), "http");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBaseUrl {
    url: String,
    scheme_end: usize,
}

impl ApiBaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or
    /// no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        let remainder = &url[scheme_end + 3..];
        let host_end = remainder.find([':', '/', '?', '#']).unwrap_or(remainder.len());
        if host_end == 0 {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self { url, scheme_end })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl FromStr for ApiBaseUrl {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_empty_string() {
        assert!(matches!(
            AccessToken::new(""),
            Err(ConfigError::EmptyAccessToken)
        ));
        assert!(matches!(
            AccessToken::new("   "),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_access_token_masks_value_in_debug() {
        let token = AccessToken::new("shpat_super_secret").unwrap();
        let debug_output = format!("{token:?}");
        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("super_secret"));
    }

    #[test]
    fn test_shop_domain_normalizes_short_format() {
        let domain = ShopDomain::new("my-store").unwrap();
        assert_eq!(domain.as_ref(), "my-store.myshopify.com");
        assert_eq!(domain.shop_name(), "my-store");
    }

    #[test]
    fn test_shop_domain_accepts_full_format() {
        let domain = ShopDomain::new("my-store.myshopify.com").unwrap();
        assert_eq!(domain.as_ref(), "my-store.myshopify.com");
        assert_eq!(domain.shop_name(), "my-store");
    }

    #[test]
    fn test_shop_domain_strips_scheme_and_trailing_slash() {
        let domain = ShopDomain::new(" https://My-Store.myshopify.com/ ").unwrap();
        assert_eq!(domain.as_ref(), "my-store.myshopify.com");
    }

    #[test]
    fn test_shop_domain_accepts_custom_domain() {
        let domain = ShopDomain::new("shop.example.com").unwrap();
        assert_eq!(domain.as_ref(), "shop.example.com");
        assert_eq!(domain.shop_name(), "shop");
    }

    #[test]
    fn test_shop_domain_rejects_invalid_domains() {
        assert!(ShopDomain::new("").is_err());
        assert!(ShopDomain::new("https://").is_err());
        assert!(ShopDomain::new("my store").is_err());
        assert!(ShopDomain::new("my_store").is_err());
        assert!(ShopDomain::new("-my-store").is_err());
        assert!(ShopDomain::new("my-store-").is_err());
        assert!(ShopDomain::new("my-store..myshopify.com").is_err());
    }

    #[test]
    fn test_shop_domain_deserializes_from_string() {
        let domain: ShopDomain = serde_json::from_str(r#""test-shop""#).unwrap();
        assert_eq!(domain.as_ref(), "test-shop.myshopify.com");
    }

    #[test]
    fn test_api_base_url_validates_format() {
        let url = ApiBaseUrl::new("http://localhost:3000").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.as_ref(), "http://localhost:3000");

        assert!(ApiBaseUrl::new("localhost:3000").is_err());
        assert!(ApiBaseUrl::new("https://").is_err());
        assert!(ApiBaseUrl::new("://example.com").is_err());
    }
}
