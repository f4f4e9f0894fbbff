//! Products query documents.

/// Page size for bulk exports; the Admin API's `first:` ceiling.
pub const PAGE_SIZE: usize = 250;

/// Default size of a "latest N" snapshot.
pub const LATEST_SNAPSHOT_SIZE: usize = 50;

/// How many products an exporter fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePolicy {
    /// Bulk export: pages of [`PAGE_SIZE`] until `hasNextPage` is false.
    All,
    /// A single page of the `n` most recently created products. No
    /// pagination loop, even when more products exist.
    Latest(usize),
}

/// A `products` query parameterized by an optional `after:` cursor.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::export::{PagePolicy, ProductQuery};
///
/// let query = ProductQuery::new("id title", PagePolicy::All);
/// let document = query.document(Some("abc"));
/// assert!(document.contains(r#"products(first: 250, after: "abc")"#));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    selection: &'static str,
    policy: PagePolicy,
}

impl ProductQuery {
    /// Creates a query selecting `selection` on each product node.
    #[must_use]
    pub const fn new(selection: &'static str, policy: PagePolicy) -> Self {
        Self { selection, policy }
    }

    /// Returns the page policy.
    #[must_use]
    pub const fn policy(&self) -> PagePolicy {
        self.policy
    }

    /// Returns `true` when the paginator should follow cursors.
    #[must_use]
    pub const fn paginates(&self) -> bool {
        matches!(self.policy, PagePolicy::All)
    }

    /// Renders the GraphQL document for one page.
    ///
    /// The cursor is embedded as a JSON string literal so quotes and
    /// backslashes in it stay escaped.
    #[must_use]
    pub fn document(&self, after: Option<&str>) -> String {
        let arguments = match self.policy {
            PagePolicy::All => {
                let after = after.map_or_else(String::new, |cursor| {
                    format!(", after: {}", serde_json::Value::from(cursor))
                });
                format!("first: {PAGE_SIZE}{after}")
            }
            PagePolicy::Latest(count) => {
                format!("first: {count}, sortKey: CREATED_AT, reverse: true")
            }
        };

        format!(
            "{{ products({arguments}) {{ pageInfo {{ hasNextPage }} edges {{ cursor node {{ {} }} }} }} }}",
            self.selection
        )
    }
}
