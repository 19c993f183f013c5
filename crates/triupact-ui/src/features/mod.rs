//! Feature surfaces: pure state per view plus the wasm-only Yew views.

pub mod dashboard;
pub mod login;
pub mod resources;
pub mod users;

/// Fetch status of a data-backed view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// A request is in flight.
    #[default]
    Loading,
    /// The last request succeeded.
    Ready,
    /// The last request failed; the text is shown inline.
    Failed(String),
}

impl LoadStatus {
    /// `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Inline error text, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
