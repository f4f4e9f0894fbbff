//! Product and variant nodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pagination flags of a connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether more edges remain beyond this page.
    #[serde(default)]
    pub has_next_page: bool,
}

/// One edge of a connection: a node plus its opaque cursor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Edge<T> {
    /// Opaque position marker; present when the query selected it.
    #[serde(default)]
    pub cursor: Option<String>,
    /// The wrapped node.
    pub node: T,
}

/// A GraphQL connection (`{ pageInfo, edges: [{ cursor, node }] }`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// Page flags; absent for nested connections that do not select them.
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    /// Edges in response order.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            page_info: None,
            edges: Vec::new(),
        }
    }
}

impl<T> Connection<T> {
    /// Iterates over the nodes in response order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the connection has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns `true` when the page says more edges follow.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page_info.is_some_and(|info| info.has_next_page)
    }

    /// Returns the cursor of the last edge, used as the next `after:`.
    #[must_use]
    pub fn end_cursor(&self) -> Option<&str> {
        self.edges.last().and_then(|edge| edge.cursor.as_deref())
    }
}

/// A named product option and its allowed values (e.g. `Size: S, M, L`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option name.
    #[serde(default)]
    pub name: Option<String>,
    /// Allowed values, in display order.
    #[serde(default)]
    pub values: Vec<String>,
}

/// A product or variant image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// CDN URL of the image.
    #[serde(default)]
    pub url: Option<String>,
}

/// A product metafield.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metafield {
    /// Metafield namespace.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Metafield key.
    #[serde(default)]
    pub key: Option<String>,
    /// Serialized value.
    #[serde(default)]
    pub value: Option<String>,
    /// Metafield type (e.g. `single_line_text_field`).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A selected option on a variant (e.g. `Size: M`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name.
    #[serde(default)]
    pub name: Option<String>,
    /// Selected value.
    #[serde(default)]
    pub value: Option<String>,
}

/// A weight with its unit (`GRAMS`, `KILOGRAMS`, `OUNCES`, `POUNDS`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Weight {
    /// Numeric weight.
    #[serde(default)]
    pub value: Option<f64>,
    /// Weight unit.
    #[serde(default)]
    pub unit: Option<String>,
}

/// Physical measurement of an inventory item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Measurement {
    /// Item weight.
    #[serde(default)]
    pub weight: Option<Weight>,
}

/// The inventory item behind a variant. Since 2024-07 the weight lives here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InventoryItem {
    /// Physical measurement.
    #[serde(default)]
    pub measurement: Option<Measurement>,
}

/// A product variant node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Global id (`gid://shopify/ProductVariant/<n>`).
    #[serde(default)]
    pub id: Option<String>,
    /// Variant title (combination of option values, or `Default Title`).
    #[serde(default)]
    pub title: Option<String>,
    /// SKU code.
    #[serde(default)]
    pub sku: Option<String>,
    /// Barcode, UPC, or ISBN.
    #[serde(default)]
    pub barcode: Option<String>,
    /// Price as a decimal string.
    #[serde(default)]
    pub price: Option<String>,
    /// Compare-at price as a decimal string.
    #[serde(default)]
    pub compare_at_price: Option<String>,
    /// Available quantity across locations.
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    /// Whether the variant can be purchased.
    #[serde(default)]
    pub available_for_sale: Option<bool>,
    /// Selected option values.
    #[serde(default)]
    pub selected_options: Option<Vec<SelectedOption>>,
    /// Associated image.
    #[serde(default)]
    pub image: Option<Image>,
    /// Inventory item (weight).
    #[serde(default)]
    pub inventory_item: Option<InventoryItem>,
}

impl Variant {
    /// Returns the weight recorded on the inventory item, if any.
    #[must_use]
    pub fn weight(&self) -> Option<&Weight> {
        self.inventory_item
            .as_ref()
            .and_then(|item| item.measurement.as_ref())
            .and_then(|measurement| measurement.weight.as_ref())
    }
}

/// A product node with its nested variants attached.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Global id (`gid://shopify/Product/<n>`).
    #[serde(default)]
    pub id: Option<String>,
    /// URL handle.
    #[serde(default)]
    pub handle: Option<String>,
    /// Product title.
    #[serde(default)]
    pub title: Option<String>,
    /// Plain-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Product type.
    #[serde(default)]
    pub product_type: Option<String>,
    /// Vendor name.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Tags in upstream order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Status (`ACTIVE`, `DRAFT`, `ARCHIVED`).
    #[serde(default)]
    pub status: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Option definitions.
    #[serde(default)]
    pub options: Vec<ProductOption>,
    /// Images in display order.
    #[serde(default)]
    pub images: Connection<Image>,
    /// Metafields.
    #[serde(default)]
    pub metafields: Connection<Metafield>,
    /// Variants in display order.
    #[serde(default)]
    pub variants: Connection<Variant>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_deserializes_nested_connections() {
        let product: Product = serde_json::from_value(json!({
            "id": "gid://shopify/Product/1",
            "title": "Shirt",
            "tags": ["summer", "cotton"],
            "createdAt": "2024-03-01T10:00:00Z",
            "options": [{"id": "gid://shopify/ProductOption/9", "name": "Size", "values": ["S", "M"]}],
            "images": {"edges": [{"node": {"url": "https://cdn/a.jpg", "altText": null}}]},
            "variants": {"edges": [
                {"node": {"id": "gid://shopify/ProductVariant/11", "title": "S", "price": "10.00",
                          "inventoryItem": {"measurement": {"weight": {"value": 0.2, "unit": "KILOGRAMS"}}}}},
                {"node": {"id": "gid://shopify/ProductVariant/12", "title": "M"}}
            ]}
        }))
        .unwrap();

        assert_eq!(product.title.as_deref(), Some("Shirt"));
        assert_eq!(product.tags, vec!["summer", "cotton"]);
        assert_eq!(product.options[0].values, vec!["S", "M"]);
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.variants.len(), 2);
        assert!(product.metafields.is_empty());

        let first = product.variants.nodes().next().unwrap();
        assert_eq!(first.price.as_deref(), Some("10.00"));
        assert_eq!(first.weight().and_then(|w| w.value), Some(0.2));
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let product: Product = serde_json::from_value(json!({"id": "gid://shopify/Product/2"})).unwrap();
        assert!(product.title.is_none());
        assert!(product.variants.is_empty());
        assert!(product.options.is_empty());
    }

    #[test]
    fn test_null_scalars_deserialize_as_none() {
        let variant: Variant = serde_json::from_value(json!({
            "id": "gid://shopify/ProductVariant/1",
            "sku": null,
            "compareAtPrice": null,
            "inventoryQuantity": null
        }))
        .unwrap();
        assert!(variant.sku.is_none());
        assert!(variant.compare_at_price.is_none());
        assert!(variant.inventory_quantity.is_none());
    }

    #[test]
    fn test_connection_cursor_and_page_info() {
        let connection: Connection<Product> = serde_json::from_value(json!({
            "pageInfo": {"hasNextPage": true},
            "edges": [
                {"cursor": "c1", "node": {"id": "gid://shopify/Product/1"}},
                {"cursor": "c2", "node": {"id": "gid://shopify/Product/2"}}
            ]
        }))
        .unwrap();

        assert!(connection.has_next_page());
        assert_eq!(connection.end_cursor(), Some("c2"));
    }
}
