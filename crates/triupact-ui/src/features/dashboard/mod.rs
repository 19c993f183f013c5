//! Summary dashboard: KPI cards, group filter, and section visibility.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
