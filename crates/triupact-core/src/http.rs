//! URL construction and response interpretation shared by every HTTP client.
//!
//! # Design
//! - Transport lives in the callers (`gloo-net` in the browser, `reqwest` in the CLI).
//! - Bodies are parsed leniently: non-JSON text is wrapped as `{ "raw": text }`.
//! - Non-success statuses surface the body's `error` field or `HTTP <status>`.

use serde_json::{Value, json};

use crate::error::ApiError;
use crate::record::RawRecord;

/// Prefix used when no explicit base URL is configured.
pub const DEFAULT_PREFIX: &str = "/api";
/// Header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// JSON content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Base URL plus prefix resolved from configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: String,
    prefix: &'static str,
}

impl ApiEndpoint {
    /// Resolve from an optional configured base URL.
    ///
    /// With a base, paths are appended directly; without one, requests are
    /// relative and prefixed with [`DEFAULT_PREFIX`].
    #[must_use]
    pub fn from_base(base: Option<&str>) -> Self {
        match base.map(str::trim).filter(|base| !base.is_empty()) {
            Some(base) => Self {
                base: base.to_string(),
                prefix: "",
            },
            None => Self {
                base: String::new(),
                prefix: DEFAULT_PREFIX,
            },
        }
    }

    /// Configured base, empty for relative requests.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Active prefix.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Full request URL for an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_url(&[&self.base, self.prefix, path])
    }
}

/// Join URL parts: empty parts are skipped, the first keeps its leading slash,
/// and inner slashes collapse to one.
#[must_use]
pub fn join_url(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(index, part)| {
            if index == 0 {
                part.trim_end_matches('/')
            } else {
                part.trim_matches('/')
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Bearer header value for a token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Parse a response body, wrapping non-JSON text.
#[must_use]
pub fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "raw": text }))
}

/// Message for a failed response.
#[must_use]
pub fn error_message(status: u16, body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map_or_else(|| format!("HTTP {status}"), str::to_string)
}

/// Turn a status and raw body text into the parsed body or an error.
///
/// # Errors
///
/// Returns [`ApiError::Http`] for statuses outside `200..300`.
pub fn interpret_response(status: u16, text: &str) -> Result<Value, ApiError> {
    let body = parse_body(text);
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::Http {
            status,
            message: error_message(status, &body),
        })
    }
}

/// Pull list records out of a body.
///
/// Accepts a bare array, `{ "data": [...] }`, or `{ "data": {...} }` (a single
/// record). Anything else yields no records. Non-object array items are dropped.
#[must_use]
pub fn extract_list(body: &Value) -> Vec<RawRecord> {
    let payload = match body {
        Value::Object(map) => match map.get("data") {
            Some(data) => data,
            None => return Vec::new(),
        },
        other => other,
    };
    match payload {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect(),
        Value::Object(record) => vec![record.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_endpoint_uses_api_prefix() {
        let endpoint = ApiEndpoint::from_base(None);
        assert_eq!(endpoint.prefix(), "/api");
        assert_eq!(endpoint.url("/users"), "/api/users");
        assert_eq!(endpoint.url("/api/roles"), "/api/api/roles");
        assert_eq!(ApiEndpoint::from_base(Some("  ")), endpoint);
    }

    #[test]
    fn explicit_base_drops_prefix() {
        let endpoint = ApiEndpoint::from_base(Some("http://localhost:8888/"));
        assert_eq!(endpoint.base(), "http://localhost:8888/");
        assert_eq!(endpoint.prefix(), "");
        assert_eq!(
            endpoint.url("/api/departments"),
            "http://localhost:8888/api/departments"
        );
    }

    #[test]
    fn join_collapses_slashes() {
        assert_eq!(join_url(&["http://h//", "/a/", "/b"]), "http://h/a/b");
        assert_eq!(join_url(&["", "", "/x"]), "/x");
        assert_eq!(join_url(&[]), "");
    }

    #[test]
    fn non_json_bodies_are_wrapped() {
        assert_eq!(parse_body("<html>oops</html>"), json!({"raw": "<html>oops</html>"}));
        assert_eq!(parse_body(""), json!({"raw": ""}));
        assert_eq!(parse_body("[1]"), json!([1]));
    }

    #[test]
    fn failures_carry_server_message_or_status() {
        assert_eq!(
            interpret_response(401, r#"{"error":"unauthorized"}"#),
            Err(ApiError::Http {
                status: 401,
                message: "unauthorized".into()
            })
        );
        assert_eq!(
            interpret_response(502, "Bad Gateway"),
            Err(ApiError::Http {
                status: 502,
                message: "HTTP 502".into()
            })
        );
        assert_eq!(interpret_response(200, "{}"), Ok(json!({})));
    }

    #[test]
    fn list_extraction_accepts_known_envelopes() {
        assert_eq!(extract_list(&json!([{"id": 1}, 2])).len(), 1);
        assert_eq!(extract_list(&json!({"data": [{"id": 1}, {"id": 2}]})).len(), 2);
        assert_eq!(extract_list(&json!({"data": {"id": 1}})).len(), 1);
        assert!(extract_list(&json!({"raw": "text"})).is_empty());
        assert!(extract_list(&json!({"data": null})).is_empty());
        assert!(extract_list(&json!("text")).is_empty());
    }

    #[test]
    fn bearer_formats_header() {
        assert_eq!(bearer("abc"), "Bearer abc");
    }
}
