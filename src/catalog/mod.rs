//! Upstream catalog data model.
//!
//! These types mirror the Admin GraphQL `Product` and `ProductVariant`
//! nodes. Every scalar is optional because each exporter selects a
//! different subset of fields; nested lists arrive as connections.
//! Entities are rebuilt from the response on every export and never cached.

mod gid;
mod product;

pub use gid::numeric_id;
pub use product::{
    Connection, Edge, Image, InventoryItem, Measurement, Metafield, PageInfo, Product,
    ProductOption, SelectedOption, Variant, Weight,
};
