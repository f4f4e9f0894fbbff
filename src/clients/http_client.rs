//! HTTP client for Admin API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! JSON POST requests. Each request is attempted exactly once.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::ExportConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Admin API.
///
/// The client handles:
/// - Base URI construction from the shop domain or the base URL override
/// - Default headers including User-Agent and access token
/// - Response body parsing and error serialization
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::{AccessToken, ExportConfig, ShopDomain};
/// use shopify_catalog_export::clients::HttpClient;
///
/// let config = ExportConfig::builder()
///     .shop_domain(ShopDomain::new("my-store").unwrap())
///     .access_token(AccessToken::new("shpat_123").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new("/admin/api/2024-10", &config).unwrap();
/// assert_eq!(client.base_uri(), "https://my-store.myshopify.com");
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URI (e.g., `https://my-store.myshopify.com`).
    base_uri: String,
    /// Base path (e.g., "/admin/api/2024-10").
    base_path: String,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the shop in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(base_path: impl Into<String>, config: &ExportConfig) -> Result<Self, HttpError> {
        let base_path = base_path.into();
        let shop = config.shop_domain().as_ref();

        let base_uri = config
            .api_base_url()
            .map_or_else(|| format!("https://{shop}"), |url| url.as_ref().to_string());

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Shopify Catalog Export v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert(
            "X-Shopify-Access-Token".to_string(),
            config.access_token().as_ref().to_string(),
        );

        // Proxies route on the shop's host name.
        if config.api_base_url().is_some() {
            default_headers.insert("Host".to_string(), shop.to_string());
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri,
            base_path,
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a POST request to the Admin API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on connection failures and
    /// [`HttpError::Response`] for any non-2xx status.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = format!("{}{}/{}", self.base_uri, self.base_path, request.path);

        let mut req_builder = self.client.post(&url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder.body(request.body.to_string());

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text)
                .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
        };

        let response = HttpResponse::new(code, res_headers, body);

        if let Some(reason) = response.deprecation_reason() {
            tracing::warn!(
                "Deprecated request to Shopify API at {}, received reason: {}",
                request.path,
                reason
            );
        }

        if response.is_ok() {
            return Ok(response);
        }

        Err(HttpError::Response(HttpResponseError {
            code,
            message: Self::serialize_error(&response),
            error_reference: response.request_id().map(String::from),
        }))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for key in ["errors", "error", "error_description", "raw_body"] {
            if let Some(value) = response.body.get(key) {
                error_body.insert(key.to_string(), value.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        if error_body.is_empty() {
            return format!("HTTP {}", response.code);
        }
        serde_json::Value::Object(error_body).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ApiBaseUrl, ShopDomain};
    use serde_json::json;

    fn test_config() -> ExportConfig {
        ExportConfig::builder()
            .shop_domain(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("test-access-token").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_with_shop_domain() {
        let client = HttpClient::new("/admin/api/2024-10", &test_config()).unwrap();

        assert_eq!(client.base_uri(), "https://test-shop.myshopify.com");
        assert_eq!(client.base_path(), "/admin/api/2024-10");
        assert!(client.default_headers().get("Host").is_none());
    }

    #[test]
    fn test_access_token_header_injection() {
        let client = HttpClient::new("/admin/api/2024-10", &test_config()).unwrap();

        assert_eq!(
            client.default_headers().get("X-Shopify-Access-Token"),
            Some(&"test-access-token".to_string())
        );
        assert_eq!(
            client.default_headers().get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_base_url_override_sets_host_header() {
        let config = ExportConfig::builder()
            .shop_domain(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .api_base_url(ApiBaseUrl::new("http://127.0.0.1:9999").unwrap())
            .build()
            .unwrap();

        let client = HttpClient::new("/admin/api/2024-10", &config).unwrap();
        assert_eq!(client.base_uri(), "http://127.0.0.1:9999");
        assert_eq!(
            client.default_headers().get("Host"),
            Some(&"test-shop.myshopify.com".to_string())
        );
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ExportConfig::builder()
            .shop_domain(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .user_agent_prefix("CatalogBot/1.0")
            .build()
            .unwrap();

        let client = HttpClient::new("/admin/api/2024-10", &config).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("CatalogBot/1.0 | "));
        assert!(user_agent.contains("Shopify Catalog Export"));
    }

    #[test]
    fn test_serialize_error_keeps_upstream_fields() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123".to_string()]);
        let response = HttpResponse::new(
            401,
            headers,
            json!({"errors": "[API] Invalid API key or access token"}),
        );

        let message = HttpClient::serialize_error(&response);
        assert!(message.contains("Invalid API key"));
        assert!(message.contains("abc-123"));
    }

    #[test]
    fn test_serialize_error_falls_back_to_status() {
        let response = HttpResponse::new(502, HashMap::new(), json!({}));
        assert_eq!(HttpClient::serialize_error(&response), "HTTP 502");
    }
}
