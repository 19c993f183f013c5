//! Shared client utilities, error types, and response classification for the CLI.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use triupact_core::ApiError;
use triupact_core::http::{
    ApiEndpoint, JSON_CONTENT_TYPE, bearer, interpret_response, parse_body,
};
use triupact_core::session::SessionStore;
use url::Url;

use crate::store::FileStore;

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Dependencies constructed from CLI options.
#[derive(Clone)]
pub(crate) struct CliDependencies {
    pub(crate) client: Client,
}

impl CliDependencies {
    /// Build an HTTP client that tags every request with the trace id.
    pub(crate) fn from_env(timeout_secs: u64, trace_id: &str) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        Ok(Self { client })
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) endpoint: ApiEndpoint,
    pub(crate) session: SessionStore<FileStore>,
}

impl AppContext {
    pub(crate) fn new(client: Client, base_url: &Url, session: FileStore) -> Self {
        Self {
            client,
            endpoint: ApiEndpoint::from_base(Some(base_url.as_str())),
            session: SessionStore::new(session),
        }
    }

    /// `GET` a path and return the parsed body.
    pub(crate) async fn get_json(&self, path: &str) -> CliResult<Value> {
        let url = self.endpoint.url(path);
        let request = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        let (status, text) = self.exchange(path, request).await?;
        interpret_response(status, &text).map_err(|err| classify_problem(path, &err))
    }

    /// `POST` a JSON body; the status is returned alongside the parsed body
    /// so callers can read error payloads themselves.
    pub(crate) async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> CliResult<(u16, Value)> {
        let url = self.endpoint.url(path);
        let request = self.client.post(&url).json(body);
        let (status, text) = self.exchange(path, request).await?;
        Ok((status, parse_body(&text)))
    }

    async fn exchange(&self, path: &str, mut request: RequestBuilder) -> CliResult<(u16, String)> {
        if let Some(token) = self.session.active(Utc::now()) {
            request = request.header(AUTHORIZATION, bearer(&token.value));
        }
        let response = request
            .send()
            .await
            .map_err(|err| CliError::failure(anyhow!("request to {path} failed: {err}")))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| CliError::failure(anyhow!("failed to read {path} response: {err}")))?;
        debug!(path, status, bytes = text.len(), "response received");
        Ok((status, text))
    }
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Classify an API failure into a CLI error.
pub(crate) fn classify_problem(path: &str, error: &ApiError) -> CliError {
    match error {
        ApiError::Http { status, message } if matches!(status, 400 | 409 | 422) => {
            CliError::validation(message.clone())
        }
        ApiError::Http { status, message } => {
            CliError::failure(anyhow!("{message} (status {status} from {path})"))
        }
        other => CliError::failure(anyhow!("{path}: {other}")),
    }
}

#[cfg(test)]
pub(crate) fn context_with(
    server: &httpmock::MockServer,
    dir: &tempfile::TempDir,
) -> anyhow::Result<AppContext> {
    let base = parse_url(&server.base_url()).map_err(|err| anyhow!(err))?;
    Ok(AppContext::new(
        Client::new(),
        &base,
        FileStore::new(dir.path().join("session.json")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use serde_json::json;
    use triupact_core::session::SessionToken;

    #[test]
    fn exit_codes_separate_validation_from_failure() {
        let validation = CliError::validation("bad input");
        assert_eq!(validation.exit_code(), 2);
        assert_eq!(validation.display_message(), "bad input");
        let failure = CliError::failure(anyhow!("boom"));
        assert_eq!(failure.exit_code(), 3);
        assert_eq!(failure.display_message(), "boom");
    }

    #[test]
    fn problems_map_by_status() {
        let conflict = ApiError::Http {
            status: 422,
            message: "email taken".into(),
        };
        assert!(matches!(
            classify_problem("/users", &conflict),
            CliError::Validation(message) if message == "email taken"
        ));
        let outage = ApiError::Http {
            status: 503,
            message: "HTTP 503".into(),
        };
        let err = classify_problem("/users", &outage);
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "HTTP 503 (status 503 from /users)");
    }

    #[test]
    fn url_parsing_reports_input() {
        assert!(parse_url("http://localhost:8888").is_ok());
        assert!(parse_url("not a url").is_err_and(|err| err.contains("not a url")));
    }

    #[tokio::test]
    async fn requests_carry_trace_id_header() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/roles")
                .header(HEADER_REQUEST_ID, "trace-1")
                .header("cache-control", "no-store");
            then.status(200).json_body(json!([]));
        });
        let dir = tempfile::tempdir()?;
        let deps = CliDependencies::from_env(5, "trace-1")
            .map_err(|err| anyhow!(err.display_message()))?;
        let mut ctx = context_with(&server, &dir)?;
        ctx.client = deps.client;
        let body = ctx
            .get_json("/api/roles")
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(body, json!([]));
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn active_session_adds_bearer_token() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/users")
                .header("authorization", "Bearer tok-1");
            then.status(200).json_body(json!([{"id": 1}]));
        });
        let dir = tempfile::tempdir()?;
        let ctx = context_with(&server, &dir)?;
        ctx.session.save(&SessionToken::new(
            "tok-1",
            Utc::now() + chrono::TimeDelta::hours(1),
        ))?;
        ctx.get_json("/users")
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn server_errors_surface_body_message() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/roles");
            then.status(500).json_body(json!({"error": "database offline"}));
        });
        let dir = tempfile::tempdir()?;
        let ctx = context_with(&server, &dir)?;
        let err = ctx
            .get_json("/api/roles")
            .await
            .err()
            .ok_or_else(|| anyhow!("expected failure"))?;
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().starts_with("database offline"));
        Ok(())
    }
}
