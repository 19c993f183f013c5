//! Generic resource table driven by the core list-view controller.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
