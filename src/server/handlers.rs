//! Route handlers.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use axum::Json;
use serde::Serialize;

use crate::clients::SDK_VERSION;
use crate::config::Credentials;
use crate::export::{export, CsvDocument, ExportError, Exporter};
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub(super) struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: SDK_VERSION,
    })
}

/// `GET` and `POST` handlers for one exporter.
pub(super) fn export_route(exporter: Exporter) -> MethodRouter<AppState> {
    let handler = move |State(state): State<AppState>,
                        Query(query): Query<HashMap<String, String>>,
                        headers: HeaderMap,
                        body: Bytes| async move {
        let credentials = if exporter.accepts_request_credentials() {
            state
                .env_credentials()
                .clone()
                .or(request_credentials(&query, &headers, &body))
        } else {
            state.env_credentials().clone()
        };

        run_export(exporter, &state, &credentials).await
    };

    get(handler.clone()).post(handler)
}

/// Reads `SHOP_DOMAIN` / `SHOP_TOKEN` from the query string, falling back to
/// the body.
///
/// A form-encoded body is parsed as such; any other non-empty body is tried
/// as a JSON object. Bodies that fail to parse contribute nothing.
#[must_use]
pub fn request_credentials(
    query: &HashMap<String, String>,
    headers: &HeaderMap,
    body: &[u8],
) -> Credentials {
    let from_query = Credentials::new(
        query.get(Credentials::SHOP_DOMAIN).map(String::as_str),
        query.get(Credentials::SHOP_TOKEN).map(String::as_str),
    );

    from_query.or(body_credentials(headers, body))
}

fn body_credentials(headers: &HeaderMap, body: &[u8]) -> Credentials {
    if body.is_empty() {
        return Credentials::default();
    }

    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

    if is_form {
        return std::str::from_utf8(body)
            .map(Credentials::from_form)
            .unwrap_or_default();
    }

    serde_json::from_slice(body).unwrap_or_default()
}

async fn run_export(exporter: Exporter, state: &AppState, credentials: &Credentials) -> Response {
    match configure_and_export(exporter, state, credentials).await {
        Ok(document) => csv_response(document),
        Err(error) => {
            tracing::error!(exporter = exporter.name(), %error, "Export failed");
            error.into_response()
        }
    }
}

async fn configure_and_export(
    exporter: Exporter,
    state: &AppState,
    credentials: &Credentials,
) -> Result<CsvDocument, ExportError> {
    if !credentials.is_complete() {
        return Err(ExportError::MissingCredentials);
    }
    let config = state.base_config().credentials(credentials)?.build()?;
    export(exporter, &config).await
}

fn csv_response(document: CsvDocument) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", document.filename),
            ),
        ],
        document.body,
    )
        .into_response()
}

impl IntoResponse for ExportError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = if status.is_client_error() {
            self.to_string()
        } else {
            format!("Error: {self}")
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
