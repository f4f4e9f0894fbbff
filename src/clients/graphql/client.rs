//! GraphQL client implementation for the Shopify Admin API.

use crate::clients::graphql::GraphqlError;
use crate::clients::{HttpClient, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, ExportConfig};

/// GraphQL API client for the Shopify Admin API.
///
/// Requests go to `<base>/admin/api/<version>/graphql.json` with the
/// `X-Shopify-Access-Token` header and a `{"query": "<document>"}` body.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_catalog_export::clients::GraphqlClient;
///
/// let client = GraphqlClient::new(&config)?;
/// let response = client.query("{ shop { name } }").await?;
/// println!("Shop: {}", response.body["data"]["shop"]["name"]);
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    http_client: HttpClient,
    api_version: ApiVersion,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client using the API version from `config`.
    ///
    /// Logs a warning when the configured version is past Shopify's support
    /// window.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &ExportConfig) -> Result<Self, GraphqlError> {
        let api_version = config.api_version().clone();
        if api_version.is_deprecated() {
            tracing::warn!(
                "Admin API version {} is past the support window (oldest supported: {})",
                api_version,
                ApiVersion::minimum_supported()
            );
        }

        let base_path = format!("/admin/api/{api_version}");
        let http_client = HttpClient::new(base_path, config)?;

        Ok(Self {
            http_client,
            api_version,
        })
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Executes a GraphQL document against the Admin API.
    ///
    /// The body is `{"query": query}`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for network errors and non-2xx
    /// responses. GraphQL-level errors are left in `response.body["errors"]`.
    pub async fn query(&self, query: &str) -> Result<HttpResponse, GraphqlError> {
        let body = serde_json::json!({ "query": query });
        let request = HttpRequest::builder("graphql.json").body(body).build();
        self.http_client.request(request).await.map_err(Into::into)
    }
}
