//! HTTP client helpers (REST).
//!
//! # Design
//! - URL building, status mapping, and body parsing come from `triupact_core::http`.
//! - Every call runs under the caller's `AbortSignal`; an aborted call yields `ApiError::Aborted`.
//! - The bearer token is read from the session store per request, never cached.

use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde_json::Value;
use triupact_core::ApiError;
use triupact_core::http::{
    AUTHORIZATION_HEADER, ApiEndpoint, JSON_CONTENT_TYPE, bearer, interpret_response, parse_body,
};
use triupact_core::session::SessionStore;
use web_sys::{AbortSignal, RequestCache, RequestCredentials};

use crate::app::preferences::{BrowserStore, now};

const CONTENT_TYPE_HEADER: &str = "Content-Type";

pub(crate) struct ApiClient {
    endpoint: ApiEndpoint,
    session: SessionStore<BrowserStore>,
}

impl ApiClient {
    pub(crate) const fn new(endpoint: ApiEndpoint) -> Self {
        Self {
            endpoint,
            session: SessionStore::new(BrowserStore),
        }
    }

    pub(crate) const fn session(&self) -> &SessionStore<BrowserStore> {
        &self.session
    }

    /// `GET` a path with `cache: no-store`, returning the parsed body.
    pub(crate) async fn get_json(
        &self,
        path: &str,
        signal: &AbortSignal,
    ) -> Result<Value, ApiError> {
        let request = Request::get(&self.endpoint.url(path))
            .header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE)
            .cache(RequestCache::NoStore)
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(signal));
        let (status, text) = self.exchange(request, signal).await?;
        interpret_response(status, &text)
    }

    /// `POST` a JSON body; the status is returned alongside the parsed body.
    pub(crate) async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        signal: &AbortSignal,
    ) -> Result<(u16, Value), ApiError> {
        let request = Request::post(&self.endpoint.url(path))
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(signal))
            .json(body)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let (status, text) = self.exchange(request, signal).await?;
        Ok((status, parse_body(&text)))
    }

    async fn exchange(
        &self,
        request: Request,
        signal: &AbortSignal,
    ) -> Result<(u16, String), ApiError> {
        let request = match self.session.active(now()) {
            Some(token) => request.header(AUTHORIZATION_HEADER, &bearer(&token.value)),
            None => request,
        };
        let response: Response = request
            .send()
            .await
            .map_err(|err| transport_error(&err, signal))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| transport_error(&err, signal))?;
        Ok((status, text))
    }
}

fn transport_error(err: &gloo_net::Error, signal: &AbortSignal) -> ApiError {
    if signal.aborted() {
        ApiError::Aborted
    } else {
        ApiError::Transport(err.to_string())
    }
}
