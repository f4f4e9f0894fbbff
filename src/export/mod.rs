//! Catalog export pipeline.
//!
//! # Overview
//!
//! An export runs four stages in sequence:
//!
//! 1. [`Paginator`] pages through `products` with a [`ProductQuery`]
//! 2. [`RowMapper`] flattens each product into rows of an [`ExportSchema`]
//! 3. [`to_csv`] serializes header and rows
//! 4. the caller writes the [`CsvDocument`] to an HTTP response or a file
//!
//! [`export`] chains the first three for one of the four [`Exporter`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_catalog_export::export::{export, Exporter};
//!
//! let document = export(Exporter::Accounting, &config).await?;
//! std::fs::write(document.filename, document.body)?;
//! ```

mod error;
mod exporters;
mod mapper;
mod paginator;
mod query;
mod writer;

pub use error::ExportError;
pub use exporters::{export, Exporter, UnknownExporter};
pub use mapper::{
    cell, clean_name, full_name, options_string, variant_object, Column, ColumnDefaults,
    DefaultRule, ExportSchema, Field, RowMapper, ZeroVariantPolicy,
};
pub use paginator::{parse_products_page, Paginator};
pub use query::{PagePolicy, ProductQuery, LATEST_SNAPSHOT_SIZE, PAGE_SIZE};
pub use writer::{to_csv, CsvDocument};
