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

//! Logging setup shared by the TriupAct native binaries.
//!
//! The browser UI logs through the console; this crate only covers processes
//! that own a `tracing` subscriber.

pub mod error;
pub mod init;

pub use error::{Result, TelemetryError};
pub use init::{
    BUILD_SHA_ENV, DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging,
    resolve_build_sha,
};
