#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Wire DTOs for the research administration API.
//!
//! The admin front-end and the CLI both decode these shapes, so the contract
//! with the remote service lives in one place. List endpoints are not modelled
//! here: their records are schemaless and normalised by `triupact-core`.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account e-mail address.
    pub email: String,
    /// Plain-text password; only ever sent over the wire.
    pub password: String,
}

/// Response returned by the login endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Whether the server accepted the credentials.
    #[serde(default)]
    pub success: bool,
    /// Issued session, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionPayload>,
    /// Server-provided failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Session issued by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionPayload {
    /// Opaque session identifier used as the bearer token.
    pub id: String,
    /// Absolute expiry instant as an RFC 3339 timestamp.
    #[serde(rename = "expiresAt")]
    pub expires_at: String,
}

/// Error envelope returned by failing endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Counts returned by the dashboard summary endpoint.
///
/// Keys keep the order the server sent them in; the dashboard groups entries
/// by position.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummaryResponse {
    /// Map of table name to row count.
    #[serde(default)]
    pub data: Map<String, Value>,
}
