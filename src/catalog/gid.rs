//! Global ID (GID) helpers.
//!
//! The Admin API identifies every node with an opaque string of the form
//! `gid://<namespace>/<Type>/<numeric-id>`. CSV consumers want the numeric
//! suffix.

/// Returns the part of `gid` after the last `/`, or an empty string when the
/// id is absent.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::catalog::numeric_id;
///
/// assert_eq!(numeric_id(Some("gid://shopify/Product/123")), "123");
/// assert_eq!(numeric_id(None), "");
/// ```
#[must_use]
pub fn numeric_id(gid: Option<&str>) -> String {
    match gid {
        None | Some("") => String::new(),
        Some(gid) => gid.rsplit('/').next().unwrap_or_default().to_string(),
    }
}
