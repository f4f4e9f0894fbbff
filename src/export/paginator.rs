//! Cursor-following product fetch.

use serde_json::Value;

use crate::catalog::{Connection, Product};
use crate::clients::GraphqlClient;
use crate::export::{ExportError, ProductQuery};

/// Pages through `products` and accumulates every node in response order.
///
/// Pages are fetched one at a time. The `after:` cursor of page *n+1* is the
/// cursor of the last edge of page *n*. Any failure discards what was
/// fetched so far.
#[derive(Debug)]
pub struct Paginator<'a> {
    client: &'a GraphqlClient,
}

impl<'a> Paginator<'a> {
    /// Creates a paginator over `client`.
    #[must_use]
    pub const fn new(client: &'a GraphqlClient) -> Self {
        Self { client }
    }

    /// Fetches all products selected by `query`.
    ///
    /// # Errors
    ///
    /// - [`ExportError::Upstream`] on transport failure or a non-2xx status
    /// - [`ExportError::GraphQlErrors`] if a page carries `errors`
    /// - [`ExportError::BadUpstreamResponse`] if a page lacks
    ///   `data.products`, or claims a next page without an edge cursor
    pub async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ExportError> {
        let mut products = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page = 0usize;

        loop {
            page += 1;
            let document = query.document(cursor.as_deref());
            let response = self.client.query(&document).await?;
            let connection = parse_products_page(&response.body)?;

            let has_next_page = connection.has_next_page();
            let end_cursor = connection.end_cursor().map(str::to_string);
            tracing::debug!(
                page,
                edges = connection.len(),
                has_next_page,
                "Fetched products page"
            );

            products.extend(connection.edges.into_iter().map(|edge| edge.node));

            if !has_next_page || !query.paginates() {
                break;
            }

            let Some(next) = end_cursor else {
                return Err(ExportError::BadUpstreamResponse {
                    body: format!(
                        "page {page} reports hasNextPage but returned no edge cursor: {}",
                        response.body
                    ),
                });
            };
            cursor = Some(next);
        }

        tracing::info!(pages = page, products = products.len(), "Fetched products");
        Ok(products)
    }
}

/// Extracts the `data.products` connection from one response body.
///
/// # Errors
///
/// Returns [`ExportError::GraphQlErrors`] when the body has a non-null
/// `errors` member, and [`ExportError::BadUpstreamResponse`] when
/// `data.products` (or its `pageInfo`) is missing or malformed.
pub fn parse_products_page(body: &Value) -> Result<Connection<Product>, ExportError> {
    if let Some(errors) = body.get("errors").filter(|errors| !errors.is_null()) {
        return Err(ExportError::GraphQlErrors {
            errors: errors.to_string(),
        });
    }

    let bad_response = || ExportError::BadUpstreamResponse {
        body: body.to_string(),
    };

    let products = body
        .get("data")
        .and_then(|data| data.get("products"))
        .filter(|products| !products.is_null())
        .ok_or_else(bad_response)?;

    let connection: Connection<Product> =
        serde_json::from_value(products.clone()).map_err(|_| bad_response())?;

    if connection.page_info.is_none() {
        return Err(bad_response());
    }

    Ok(connection)
}
