//! HTTP route handlers
//!
//! The route layer is the presentation boundary: it exposes the core's
//! snapshots as JSON and translates mutation intents into gateway writes
//! followed by a rebuild. Nothing here reaches into raw store rows except
//! to pass them through to the service.

mod admin;
mod health;
mod profiles;

pub use admin::handle_admin_request;
pub use health::health_check;
pub use profiles::handle_api_request;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::collections::HashMap;

/// JSON error body
#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
    code: &'static str,
}

/// Build a JSON response with a status code
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let payload = serde_json::to_vec(body).unwrap_or_default();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(payload)))
        .unwrap_or_else(|_| {
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Full::new(Bytes::from(r#"{"error":"Internal error"}"#)))
                .unwrap()
        })
}

/// Build a JSON error response
pub(crate) fn error_response(
    status: StatusCode,
    message: &str,
    code: &'static str,
) -> Response<Full<Bytes>> {
    json_response(
        status,
        &ApiError {
            error: message.to_string(),
            code,
        },
    )
}

/// 404 for unrouted paths
pub(crate) fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    error_response(
        StatusCode::NOT_FOUND,
        &format!("no route for {}", path),
        "NOT_FOUND",
    )
}

/// Parse a query string into decoded key/value pairs
pub(crate) fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(value).ok()?;
            Some((key.to_string(), value.into_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_decodes_values() {
        let params = parse_query("q=amina%20warsame&locale=so");
        assert_eq!(params["q"], "amina warsame");
        assert_eq!(params["locale"], "so");
    }

    #[test]
    fn test_parse_query_tolerates_empty_and_bare_keys() {
        let params = parse_query("");
        assert!(params.is_empty());

        let params = parse_query("flag&q=x");
        assert_eq!(params["flag"], "");
        assert_eq!(params["q"], "x");
    }
}
