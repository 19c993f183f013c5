//! User directory rendered as a card grid.

pub mod logic;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
