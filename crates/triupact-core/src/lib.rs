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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! DOM-free building blocks shared by the admin web UI and the CLI.
//!
//! Layout:
//! - `record`, `normalize`: raw API records and their canonical shape
//! - `sort`, `listview`, `pagination`: the filter, sort, and paginate projection
//! - `resources`: per-endpoint configuration for every list view
//! - `session`, `storage`, `guard`: session token persistence and the auth gate
//! - `http`, `lifecycle`: URL building, body parsing, and fetch sequencing
//! - `summary`, `format`: dashboard grouping and display helpers

pub mod error;
pub mod format;
pub mod guard;
pub mod http;
pub mod lifecycle;
pub mod listview;
pub mod normalize;
pub mod pagination;
pub mod record;
pub mod resources;
pub mod session;
pub mod sort;
pub mod storage;
pub mod summary;

pub use error::{ApiError, Result, SessionError, StorageError};
pub use listview::{ListPage, ListSpec, ListViewState, Listable, SearchScope};
pub use record::{CanonicalRecord, FieldValue, RawRecord};
pub use resources::{Resource, ResourceSpec};
