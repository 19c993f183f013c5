//! Shared Yew components.

pub(crate) mod auth;
pub(crate) mod empty_state;
pub(crate) mod error_banner;
pub(crate) mod kpi_card;
pub(crate) mod pagination;
pub(crate) mod search_input;
pub(crate) mod shell;
