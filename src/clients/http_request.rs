//! HTTP request type for the Admin API.
//!
//! Exports only ever POST JSON documents, so a request is a path and a JSON
//! body.

/// A JSON POST request to be sent to the Admin API.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::clients::HttpRequest;
/// use serde_json::json;
///
/// let request = HttpRequest::builder("graphql.json")
///     .body(json!({"query": "{ shop { name } }"}))
///     .build();
///
/// assert_eq!(request.path, "graphql.json");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The path (relative to base path) for this request.
    pub path: String,
    /// The JSON request body.
    pub body: serde_json::Value,
}

impl HttpRequest {
    /// Creates a new builder for a request to `path`.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    path: String,
    body: serde_json::Value,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            body: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Sets the JSON request body. Defaults to `{}`.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            path: self.path,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults_to_empty_object_body() {
        let request = HttpRequest::builder("graphql.json").build();
        assert_eq!(request.path, "graphql.json");
        assert_eq!(request.body, json!({}));
    }

    #[test]
    fn test_builder_with_body() {
        let request = HttpRequest::builder("graphql.json")
            .body(json!({"query": "{ shop { name } }"}))
            .build();

        assert_eq!(request.body["query"], "{ shop { name } }");
    }
}
