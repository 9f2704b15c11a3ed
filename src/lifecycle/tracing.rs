//! # Observability & Tracing
//!
//! The [`setup_tracing`] function installs a compact `tracing-subscriber` formatter filtered
//! by the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Lookups**: `Get` and `List` with the category (`kind`), name and group
//! - **Commits**: `Commit` with the mode, then `Committed` or `Commit failed`
//! - **Cache**: hits and evictions in groupable collections
//! - **Errors**: the remote failure alongside the resource it concerns
//!
//! ## Usage Examples
//!
//! ```bash
//! # Commits and deletes only
//! RUST_LOG=info cargo test
//!
//! # Every remote call, cache hits and evictions
//! RUST_LOG=debug cargo test
//!
//! # Filter to the groupable collections
//! RUST_LOG=azure_shortcuts::framework::groupable=debug cargo test
//! ```
//!
//! **With `RUST_LOG=debug`**, updating a resource group without a local region reads:
//!
//! ```text
//! DEBUG Reusing region of existing resource kind="resource group" name=rg1 region=westus
//! DEBUG Commit kind="resource group" name=rg1 group=None mode=Apply
//! INFO Committed kind="resource group" name=rg1 mode=Apply
//! ```

/// Installs the global subscriber. Later calls are no-ops, so every test may call it.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we log the resource kind instead
        .compact()
        .try_init();
}
