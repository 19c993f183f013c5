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

//! `triupact` binary entrypoint.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = triupact_cli::run().await;
    process::exit(exit_code);
}
