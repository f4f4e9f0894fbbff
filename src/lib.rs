//! # Shopify Catalog Export
//!
//! Pages through the Shopify Admin GraphQL API and writes the product
//! catalog out as CSV, in one of four shapes.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ExportConfig`] and [`ExportConfigBuilder`]
//! - Validated newtypes for the shop domain, access token, and base URL
//! - Credential resolution from the environment, query strings, and request
//!   bodies via [`Credentials`]
//! - An async GraphQL client for the Admin API in [`clients`]
//! - A cursor-following paginator, a schema-driven row mapper, and a CSV
//!   writer in [`export`]
//! - HTTP handlers for every exporter in [`server`]
//!
//! ## Exporters
//!
//! | Exporter     | Rows                                | File                      |
//! |--------------|-------------------------------------|---------------------------|
//! | `variants`   | one per variant, JSON variant column | `shopify_variants.csv`   |
//! | `simple`     | one per variant, latest 50 products | `shopify_simple.csv`      |
//! | `accounting` | one per variant, defaults filled in | `shopify_accounting.csv`  |
//! | `products`   | one per variant, full product dump  | `shopify_products.csv`    |
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_catalog_export::{AccessToken, ApiVersion, ExportConfig, ShopDomain};
//!
//! let config = ExportConfig::builder()
//!     .shop_domain(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .api_version(ApiVersion::V2024_10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop_domain().as_ref(), "my-store.myshopify.com");
//! ```
//!
//! ## Running an Export
//!
//! ```rust,ignore
//! use shopify_catalog_export::export::{export, Exporter};
//!
//! let document = export(Exporter::Variants, &config).await?;
//! assert_eq!(document.filename, "shopify_variants.csv");
//! ```
//!
//! ## Resolving Credentials
//!
//! ```rust
//! use shopify_catalog_export::{Credentials, ExportConfig};
//!
//! let env = Credentials::new(None, Some("shpat_env"));
//! let request = Credentials::new(Some("my-store"), Some("shpat_request"));
//!
//! let config = ExportConfig::builder()
//!     .credentials(&env.or(request))
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.access_token().as_ref(), "shpat_env");
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: credentials are resolved once at the entry point
//!   and passed down as an [`ExportConfig`]
//! - **Fail fast**: newtypes validate on construction, and any upstream
//!   failure aborts the whole export
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: built on tokio

pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod export;
pub mod server;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiBaseUrl, ApiVersion, Credentials, ExportConfig, ExportConfigBuilder,
    ShopDomain,
};
pub use error::ConfigError;

// Re-export the export entry points
pub use export::{export, CsvDocument, ExportError, Exporter};
