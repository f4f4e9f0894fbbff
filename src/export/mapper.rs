//! Schema-driven row mapping.
//!
//! One [`RowMapper`] serves every exporter. An [`ExportSchema`] lists the
//! columns (header plus [`Field`] source), the [`ColumnDefaults`] table and
//! the [`ZeroVariantPolicy`]. Each row carries exactly one value per column,
//! so row width always equals header width.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::catalog::{numeric_id, Product, ProductOption, Variant};

/// Where a column's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Numeric product id.
    ProductId,
    /// Product handle.
    Handle,
    /// Product title.
    Title,
    /// Product description.
    Description,
    /// Vendor.
    Vendor,
    /// Product type.
    ProductType,
    /// Tags joined with `, `.
    Tags,
    /// Product status.
    Status,
    /// Creation timestamp (RFC 3339, UTC).
    CreatedAt,
    /// Update timestamp (RFC 3339, UTC).
    UpdatedAt,
    /// Option definitions, see [`options_string`].
    Options,
    /// Image URLs joined with `|`.
    Images,
    /// Metafields as a JSON array.
    Metafields,
    /// All variants as a JSON array of plain objects.
    VariantsJson,
    /// Numeric variant id.
    VariantId,
    /// Raw variant title, verbatim.
    VariantTitle,
    /// `<product title> - <cleaned variant title>`, see [`full_name`].
    FullName,
    /// Variant SKU.
    Sku,
    /// Variant barcode.
    Barcode,
    /// Variant price.
    Price,
    /// Variant compare-at price.
    CompareAtPrice,
    /// Inventory quantity.
    InventoryQuantity,
    /// `true` / `false`.
    AvailableForSale,
    /// Numeric weight.
    Weight,
    /// Weight unit.
    WeightUnit,
    /// Selected options as `name:value` joined with `;`.
    SelectedOptions,
    /// Variant image URL.
    VariantImage,
    /// The variant as one JSON object.
    VariantJson,
    /// Not sourced upstream; always takes the column default.
    Static,
}

impl Field {
    /// Resolves the raw value, `None` when the upstream field is absent.
    fn resolve(self, product: &Product, variant: Option<&Variant>) -> Option<String> {
        match self {
            Self::ProductId => Some(numeric_id(product.id.as_deref())),
            Self::Handle => product.handle.clone(),
            Self::Title => product.title.clone(),
            Self::Description => product.description.clone(),
            Self::Vendor => product.vendor.clone(),
            Self::ProductType => product.product_type.clone(),
            Self::Tags => Some(product.tags.join(", ")),
            Self::Status => product.status.clone(),
            Self::CreatedAt => product.created_at.as_ref().map(timestamp),
            Self::UpdatedAt => product.updated_at.as_ref().map(timestamp),
            Self::Options => Some(options_string(&product.options)),
            Self::Images => Some(
                product
                    .images
                    .nodes()
                    .filter_map(|image| image.url.as_deref())
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
            Self::Metafields => Some(cell(&Value::Array(
                product
                    .metafields
                    .nodes()
                    .map(|m| {
                        json!({
                            "namespace": m.namespace,
                            "key": m.key,
                            "value": m.value,
                            "type": m.kind,
                        })
                    })
                    .collect(),
            ))),
            Self::VariantsJson => Some(cell(&Value::Array(
                product.variants.nodes().map(variant_object).collect(),
            ))),
            Self::FullName => {
                let title = product.title.as_deref().unwrap_or_default();
                let variant_name = variant
                    .and_then(|v| v.title.as_deref())
                    .unwrap_or_default();
                Some(full_name(title, variant_name))
            }
            Self::Static => None,
            variant_field => variant.and_then(|v| variant_field.resolve_variant(v)),
        }
    }

    fn resolve_variant(self, variant: &Variant) -> Option<String> {
        match self {
            Self::VariantId => variant.id.as_deref().map(|id| numeric_id(Some(id))),
            Self::VariantTitle => variant.title.clone(),
            Self::Sku => variant.sku.clone(),
            Self::Barcode => variant.barcode.clone(),
            Self::Price => variant.price.clone(),
            Self::CompareAtPrice => variant.compare_at_price.clone(),
            Self::InventoryQuantity => variant.inventory_quantity.map(|q| q.to_string()),
            Self::AvailableForSale => variant.available_for_sale.map(|b| b.to_string()),
            Self::Weight => variant.weight().and_then(|w| w.value).map(|w| w.to_string()),
            Self::WeightUnit => variant.weight().and_then(|w| w.unit.clone()),
            Self::SelectedOptions => variant.selected_options.as_ref().map(|options| {
                options
                    .iter()
                    .map(|o| {
                        format!(
                            "{}:{}",
                            o.name.as_deref().unwrap_or_default(),
                            o.value.as_deref().unwrap_or_default()
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(";")
            }),
            Self::VariantImage => variant.image.as_ref().and_then(|image| image.url.clone()),
            Self::VariantJson => Some(cell(&variant_object(variant))),
            _ => None,
        }
    }
}

/// When a column default replaces the upstream value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRule {
    /// Upstream value is null or absent.
    Missing,
    /// Upstream value is null, absent, or the empty string (used for prices).
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnDefault {
    value: String,
    rule: DefaultRule,
}

/// Static default values per column name.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::export::ColumnDefaults;
///
/// let defaults = ColumnDefaults::new()
///     .missing("tax_rate", "10%")
///     .blank("unit_price", "0");
///
/// assert_eq!(defaults.apply("tax_rate", None), "10%");
/// assert_eq!(defaults.apply("unit_price", Some("".to_string())), "0");
/// assert_eq!(defaults.apply("unit_price", Some("12.50".to_string())), "12.50");
/// assert_eq!(defaults.apply("sku", None), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDefaults {
    defaults: HashMap<&'static str, ColumnDefault>,
}

impl ColumnDefaults {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `value` when the column's upstream value is null or absent.
    #[must_use]
    pub fn missing(self, column: &'static str, value: impl Into<String>) -> Self {
        self.with(column, value.into(), DefaultRule::Missing)
    }

    /// Uses `value` when the column's upstream value is null, absent, or
    /// the empty string.
    #[must_use]
    pub fn blank(self, column: &'static str, value: impl Into<String>) -> Self {
        self.with(column, value.into(), DefaultRule::Blank)
    }

    fn with(mut self, column: &'static str, value: String, rule: DefaultRule) -> Self {
        self.defaults.insert(column, ColumnDefault { value, rule });
        self
    }

    /// Returns the default for `column`, if any.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.defaults.get(column).map(|d| d.value.as_str())
    }

    /// Resolves the final field value for `column`.
    #[must_use]
    pub fn apply(&self, column: &str, raw: Option<String>) -> String {
        let Some(default) = self.defaults.get(column) else {
            return raw.unwrap_or_default();
        };

        let use_default = match default.rule {
            DefaultRule::Missing => raw.is_none(),
            DefaultRule::Blank => raw.as_deref().map_or(true, str::is_empty),
        };

        if use_default {
            default.value.clone()
        } else {
            raw.unwrap_or_default()
        }
    }
}

/// What to emit for a product that has no variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroVariantPolicy {
    /// Emit nothing for the product.
    Skip,
    /// Emit one row with the variant fields left empty (or defaulted).
    EmitProductRow,
}

/// One output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Header name.
    pub header: &'static str,
    /// Value source.
    pub field: Field,
}

impl Column {
    /// Creates a column.
    #[must_use]
    pub const fn new(header: &'static str, field: Field) -> Self {
        Self { header, field }
    }
}

/// The declared layout of one CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSchema {
    columns: Vec<Column>,
    defaults: ColumnDefaults,
    zero_variants: ZeroVariantPolicy,
}

impl ExportSchema {
    /// Creates a schema with no defaults that skips variant-less products.
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            defaults: ColumnDefaults::new(),
            zero_variants: ZeroVariantPolicy::Skip,
        }
    }

    /// Sets the column defaults table.
    #[must_use]
    pub fn with_defaults(mut self, defaults: ColumnDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Sets the zero-variant policy.
    #[must_use]
    pub const fn with_zero_variants(mut self, policy: ZeroVariantPolicy) -> Self {
        self.zero_variants = policy;
        self
    }

    /// Returns the header names in column order.
    #[must_use]
    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    /// Returns the columns.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column defaults table.
    #[must_use]
    pub const fn defaults(&self) -> &ColumnDefaults {
        &self.defaults
    }

    /// Returns the zero-variant policy.
    #[must_use]
    pub const fn zero_variants(&self) -> ZeroVariantPolicy {
        self.zero_variants
    }
}

/// Flattens products into rows of an [`ExportSchema`].
#[derive(Debug, Clone, Copy)]
pub struct RowMapper<'a> {
    schema: &'a ExportSchema,
}

impl<'a> RowMapper<'a> {
    /// Creates a mapper for `schema`.
    #[must_use]
    pub const fn new(schema: &'a ExportSchema) -> Self {
        Self { schema }
    }

    /// Maps one product to its rows: one per variant, or one for a
    /// variant-less product under [`ZeroVariantPolicy::EmitProductRow`].
    #[must_use]
    pub fn map_product(&self, product: &Product) -> Vec<Vec<String>> {
        if product.variants.is_empty() {
            return match self.schema.zero_variants {
                ZeroVariantPolicy::Skip => Vec::new(),
                ZeroVariantPolicy::EmitProductRow => vec![self.row(product, None)],
            };
        }

        product
            .variants
            .nodes()
            .map(|variant| self.row(product, Some(variant)))
            .collect()
    }

    /// Maps every product, preserving order.
    #[must_use]
    pub fn map_products(&self, products: &[Product]) -> Vec<Vec<String>> {
        products.iter().flat_map(|p| self.map_product(p)).collect()
    }

    fn row(&self, product: &Product, variant: Option<&Variant>) -> Vec<String> {
        self.schema
            .columns
            .iter()
            .map(|column| {
                let raw = column.field.resolve(product, variant);
                self.schema.defaults.apply(column.header, raw)
            })
            .collect()
    }
}

/// Serializes options as `name:v1|v2` joined with `;`.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::catalog::ProductOption;
/// use shopify_catalog_export::export::options_string;
///
/// let options = vec![
///     ProductOption { name: Some("Color".into()), values: vec!["Red".into(), "Blue".into()] },
///     ProductOption { name: Some("Size".into()), values: vec!["M".into()] },
/// ];
/// assert_eq!(options_string(&options), "Color:Red|Blue;Size:M");
/// assert_eq!(options_string(&[]), "");
/// ```
#[must_use]
pub fn options_string(options: &[ProductOption]) -> String {
    options
        .iter()
        .map(|o| {
            format!(
                "{}:{}",
                o.name.as_deref().unwrap_or_default(),
                o.values.join("|")
            )
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Strips every `'` and `"` from a display name.
#[must_use]
pub fn clean_name(name: &str) -> String {
    name.chars().filter(|c| !matches!(c, '\'' | '"')).collect()
}

/// Composes `<title> - <cleaned variant name>`, or just the title when the
/// cleaned name is empty.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::export::full_name;
///
/// assert_eq!(full_name("Shirt", r#"O'Neill "L""#), "Shirt - ONeill L");
/// assert_eq!(full_name("Shirt", r#""""#), "Shirt");
/// ```
#[must_use]
pub fn full_name(title: &str, variant_name: &str) -> String {
    let cleaned = clean_name(variant_name);
    if cleaned.is_empty() {
        title.to_string()
    } else {
        format!("{title} - {cleaned}")
    }
}

/// Converts a JSON value to a CSV field: null is empty, strings are used
/// as-is, anything else is JSON-encoded.
#[must_use]
pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The plain object written to `variant_json` / `variants_json` columns.
///
/// String fields default to `""`, a zero or absent quantity becomes `null`,
/// availability defaults to `false`.
#[must_use]
pub fn variant_object(variant: &Variant) -> Value {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let selected_options: Vec<Value> = variant
        .selected_options
        .iter()
        .flatten()
        .map(|o| json!({ "name": o.name, "value": o.value }))
        .collect();

    json!({
        "id": numeric_id(variant.id.as_deref()),
        "title": text(&variant.title),
        "sku": text(&variant.sku),
        "barcode": text(&variant.barcode),
        "price": text(&variant.price),
        "compareAtPrice": text(&variant.compare_at_price),
        "inventoryQuantity": variant.inventory_quantity.filter(|q| *q != 0),
        "availableForSale": variant.available_for_sale.unwrap_or(false),
        "selectedOptions": selected_options,
    })
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
