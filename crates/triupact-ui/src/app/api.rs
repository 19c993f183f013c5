//! API client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - The client owns the session store, so components reach the session through context.

use crate::services::api::ApiClient;
use std::rc::Rc;
use triupact_core::http::ApiEndpoint;

/// Shared API client context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub(crate) client: Rc<ApiClient>,
}

impl ApiCtx {
    /// Create a new context for the configured endpoint.
    pub(crate) fn new(endpoint: ApiEndpoint) -> Self {
        Self {
            client: Rc::new(ApiClient::new(endpoint)),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
