//! The four catalog exporters.
//!
//! Each [`Exporter`] bundles a products query, a page policy, and an
//! [`ExportSchema`]. [`export`] runs one end to end: paginate, map, serialize.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::clients::GraphqlClient;
use crate::config::ExportConfig;
use crate::export::mapper::{Column, ColumnDefaults, ExportSchema, Field, ZeroVariantPolicy};
use crate::export::{
    to_csv, CsvDocument, ExportError, PagePolicy, Paginator, ProductQuery, RowMapper,
    LATEST_SNAPSHOT_SIZE,
};

const VARIANTS_SELECTION: &str = "id handle title productType options { id name values } \
     variants(first: 250) { edges { node { id title sku barcode price compareAtPrice \
     inventoryQuantity availableForSale selectedOptions { name value } } } }";

const SIMPLE_SELECTION: &str = "id handle title \
     variants(first: 250) { edges { node { id title sku barcode price compareAtPrice \
     inventoryQuantity } } }";

const ACCOUNTING_SELECTION: &str = "id title \
     variants(first: 250) { edges { node { id title sku barcode price } } }";

const PRODUCTS_SELECTION: &str = "id handle title description vendor productType tags status \
     createdAt updatedAt options { id name values } \
     images(first: 20) { edges { node { url } } } \
     metafields(first: 50) { edges { node { namespace key value type } } } \
     variants(first: 250) { edges { node { id title sku barcode price compareAtPrice \
     inventoryQuantity availableForSale selectedOptions { name value } \
     image { url } inventoryItem { measurement { weight { value unit } } } } } }";

/// A named export shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exporter {
    /// Generic variant export with a JSON column per variant.
    Variants,
    /// Snapshot of the 50 most recently created products.
    Simple,
    /// Item import for accounting systems.
    Accounting,
    /// Full product dump.
    Products,
}

impl Exporter {
    /// Every exporter, in route order.
    pub const ALL: [Self; 4] = [Self::Variants, Self::Simple, Self::Accounting, Self::Products];

    /// Returns the exporter's name as used in routes and on the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Variants => "variants",
            Self::Simple => "simple",
            Self::Accounting => "accounting",
            Self::Products => "products",
        }
    }

    /// Returns the attachment filename.
    #[must_use]
    pub const fn filename(self) -> &'static str {
        match self {
            Self::Variants => "shopify_variants.csv",
            Self::Simple => "shopify_simple.csv",
            Self::Accounting => "shopify_accounting.csv",
            Self::Products => "shopify_products.csv",
        }
    }

    /// Returns `true` if credentials may come from the request's query or
    /// body. The full dump reads the environment only.
    #[must_use]
    pub const fn accepts_request_credentials(self) -> bool {
        !matches!(self, Self::Products)
    }

    /// Returns the products query this exporter issues.
    #[must_use]
    pub const fn query(self) -> ProductQuery {
        match self {
            Self::Variants => ProductQuery::new(VARIANTS_SELECTION, PagePolicy::All),
            Self::Simple => ProductQuery::new(
                SIMPLE_SELECTION,
                PagePolicy::Latest(LATEST_SNAPSHOT_SIZE),
            ),
            Self::Accounting => ProductQuery::new(ACCOUNTING_SELECTION, PagePolicy::All),
            Self::Products => ProductQuery::new(PRODUCTS_SELECTION, PagePolicy::All),
        }
    }

    /// Returns the CSV layout.
    #[must_use]
    pub fn schema(self) -> ExportSchema {
        match self {
            Self::Variants => ExportSchema::new(vec![
                Column::new("shopify_product_id", Field::ProductId),
                Column::new("variant_id", Field::VariantId),
                Column::new("handle", Field::Handle),
                Column::new("title", Field::Title),
                Column::new("product_type", Field::ProductType),
                Column::new("options", Field::Options),
                Column::new("variant_json", Field::VariantJson),
            ]),
            Self::Simple => ExportSchema::new(vec![
                Column::new("product_id", Field::ProductId),
                Column::new("variant_id", Field::VariantId),
                Column::new("handle", Field::Handle),
                Column::new("product_title", Field::Title),
                Column::new("variant_title", Field::VariantTitle),
                Column::new("sku", Field::Sku),
                Column::new("barcode", Field::Barcode),
                Column::new("price", Field::Price),
                Column::new("compare_at_price", Field::CompareAtPrice),
                Column::new("inventory_quantity", Field::InventoryQuantity),
            ]),
            Self::Accounting => ExportSchema::new(vec![
                Column::new("item_code", Field::ProductId),
                Column::new("variant_id", Field::VariantId),
                Column::new("item_name", Field::FullName),
                Column::new("variant_name", Field::VariantTitle),
                Column::new("sku", Field::Sku),
                Column::new("barcode", Field::Barcode),
                Column::new("unit_price", Field::Price),
                Column::new("unit", Field::Static),
                Column::new("tax_rate", Field::Static),
                Column::new("tax_category", Field::Static),
                Column::new("account_name", Field::Static),
                Column::new("notes", Field::Static),
            ])
            .with_defaults(
                ColumnDefaults::new()
                    .blank("unit_price", "0")
                    .missing("unit", "pcs")
                    .missing("tax_rate", "10%")
                    .missing("tax_category", "taxable sales")
                    .missing("account_name", "Sales")
                    .missing("notes", ""),
            )
            .with_zero_variants(ZeroVariantPolicy::EmitProductRow),
            Self::Products => ExportSchema::new(vec![
                Column::new("product_id", Field::ProductId),
                Column::new("variant_id", Field::VariantId),
                Column::new("handle", Field::Handle),
                Column::new("title", Field::Title),
                Column::new("description", Field::Description),
                Column::new("vendor", Field::Vendor),
                Column::new("product_type", Field::ProductType),
                Column::new("tags", Field::Tags),
                Column::new("status", Field::Status),
                Column::new("created_at", Field::CreatedAt),
                Column::new("updated_at", Field::UpdatedAt),
                Column::new("options", Field::Options),
                Column::new("variant_title", Field::VariantTitle),
                Column::new("sku", Field::Sku),
                Column::new("barcode", Field::Barcode),
                Column::new("price", Field::Price),
                Column::new("compare_at_price", Field::CompareAtPrice),
                Column::new("weight", Field::Weight),
                Column::new("weight_unit", Field::WeightUnit),
                Column::new("inventory_quantity", Field::InventoryQuantity),
                Column::new("available_for_sale", Field::AvailableForSale),
                Column::new("selected_options", Field::SelectedOptions),
                Column::new("variant_image", Field::VariantImage),
                Column::new("images", Field::Images),
                Column::new("metafields", Field::Metafields),
                Column::new("variants_json", Field::VariantsJson),
            ]),
        }
    }
}

impl fmt::Display for Exporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an exporter name that matches none of [`Exporter::ALL`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown exporter '{name}'. Expected one of: variants, simple, accounting, products")]
pub struct UnknownExporter {
    /// The name that was given.
    pub name: String,
}

impl FromStr for Exporter {
    type Err = UnknownExporter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|exporter| exporter.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownExporter {
                name: s.to_string(),
            })
    }
}

/// Runs `exporter` against the shop in `config`.
///
/// # Errors
///
/// Any [`ExportError`]; nothing is returned on failure, not even rows
/// mapped from earlier pages.
pub async fn export(exporter: Exporter, config: &ExportConfig) -> Result<CsvDocument, ExportError> {
    tracing::info!(
        exporter = exporter.name(),
        shop = %config.shop_domain(),
        api_version = %config.api_version(),
        "Starting export"
    );

    let client = GraphqlClient::new(config)?;
    let products = Paginator::new(&client)
        .fetch_products(&exporter.query())
        .await?;

    let schema = exporter.schema();
    let rows = RowMapper::new(&schema).map_products(&products);
    let body = to_csv(&schema.header(), &rows)?;

    tracing::info!(
        exporter = exporter.name(),
        products = products.len(),
        rows = rows.len(),
        "Export finished"
    );

    Ok(CsvDocument {
        filename: exporter.filename(),
        body,
    })
}
