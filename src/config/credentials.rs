//! Raw credential lookup.
//!
//! Values arrive from three places, checked in order: the process
//! environment (captured once at startup), request query parameters, and
//! request body fields. All three use the same names, `SHOP_DOMAIN` and
//! `SHOP_TOKEN`.

use serde::Deserialize;
use std::fmt;

/// Unvalidated `SHOP_DOMAIN` / `SHOP_TOKEN` values.
///
/// Empty strings are treated as absent.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::Credentials;
///
/// let env = Credentials::new(Some("env-shop"), None);
/// let query = Credentials::new(Some("query-shop"), Some("query-token"));
///
/// let merged = env.or(query);
/// assert_eq!(merged.shop_domain(), Some("env-shop"));
/// assert_eq!(merged.shop_token(), Some("query-token"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(rename = "SHOP_DOMAIN", default)]
    shop_domain: Option<String>,
    #[serde(rename = "SHOP_TOKEN", default)]
    shop_token: Option<String>,
}

impl Credentials {
    /// Environment variable holding the shop domain.
    pub const SHOP_DOMAIN: &'static str = "SHOP_DOMAIN";
    /// Environment variable holding the Admin API access token.
    pub const SHOP_TOKEN: &'static str = "SHOP_TOKEN";

    /// Creates credentials from optional raw values.
    #[must_use]
    pub fn new(shop_domain: Option<&str>, shop_token: Option<&str>) -> Self {
        Self {
            shop_domain: shop_domain.map(str::to_string),
            shop_token: shop_token.map(str::to_string),
        }
    }

    /// Reads `SHOP_DOMAIN` and `SHOP_TOKEN` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            shop_domain: std::env::var(Self::SHOP_DOMAIN).ok(),
            shop_token: std::env::var(Self::SHOP_TOKEN).ok(),
        }
    }

    /// Returns the shop domain, if present and non-empty.
    #[must_use]
    pub fn shop_domain(&self) -> Option<&str> {
        non_empty(self.shop_domain.as_deref())
    }

    /// Returns the access token, if present and non-empty.
    #[must_use]
    pub fn shop_token(&self) -> Option<&str> {
        non_empty(self.shop_token.as_deref())
    }

    /// Returns `true` when both values are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.shop_domain().is_some() && self.shop_token().is_some()
    }

    /// Fills each missing value from `fallback`; values already present win.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        let has_domain = self.shop_domain().is_some();
        let has_token = self.shop_token().is_some();
        let shop_domain = if has_domain {
            self.shop_domain
        } else {
            fallback.shop_domain
        };
        let shop_token = if has_token {
            self.shop_token
        } else {
            fallback.shop_token
        };
        Self {
            shop_domain,
            shop_token,
        }
    }

    /// Parses credentials from an `application/x-www-form-urlencoded` body.
    ///
    /// Unknown keys and undecodable pairs are ignored.
    #[must_use]
    pub fn from_form(body: &str) -> Self {
        let mut credentials = Self::default();
        for pair in body.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.replace('+', " ");
            let Ok(value) = urlencoding::decode(&value) else {
                continue;
            };
            match key {
                Self::SHOP_DOMAIN => credentials.shop_domain = Some(value.into_owned()),
                Self::SHOP_TOKEN => credentials.shop_token = Some(value.into_owned()),
                _ => {}
            }
        }
        credentials
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("shop_domain", &self.shop_domain)
            .field("shop_token", &self.shop_token.as_ref().map(|_| "*****"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_absent() {
        let credentials = Credentials::new(Some(""), Some("  "));
        assert_eq!(credentials.shop_domain(), None);
        assert_eq!(credentials.shop_token(), None);
        assert!(!credentials.is_complete());
    }

    #[test]
    fn test_or_prefers_present_values() {
        let primary = Credentials::new(Some("primary"), Some(""));
        let fallback = Credentials::new(Some("fallback"), Some("token"));

        let merged = primary.or(fallback);
        assert_eq!(merged.shop_domain(), Some("primary"));
        assert_eq!(merged.shop_token(), Some("token"));
        assert!(merged.is_complete());
    }

    #[test]
    fn test_deserializes_from_json_field_names() {
        let credentials: Credentials =
            serde_json::from_str(r#"{"SHOP_DOMAIN":"my-store","SHOP_TOKEN":"abc","extra":1}"#)
                .unwrap();
        assert_eq!(credentials.shop_domain(), Some("my-store"));
        assert_eq!(credentials.shop_token(), Some("abc"));
    }

    #[test]
    fn test_from_form_decodes_values() {
        let credentials =
            Credentials::from_form("SHOP_DOMAIN=my-store.myshopify.com&SHOP_TOKEN=shpat%5F1&x=y");
        assert_eq!(credentials.shop_domain(), Some("my-store.myshopify.com"));
        assert_eq!(credentials.shop_token(), Some("shpat_1"));
    }

    #[test]
    fn test_debug_masks_token() {
        let credentials = Credentials::new(Some("my-store"), Some("shpat_secret"));
        let debug_output = format!("{credentials:?}");
        assert!(debug_output.contains("my-store"));
        assert!(!debug_output.contains("shpat_secret"));
    }
}
