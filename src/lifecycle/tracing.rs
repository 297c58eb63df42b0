//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! Library code only emits events; binaries and tests decide whether to install a subscriber.
//!
//! ## What Gets Traced
//!
//! - **Parsing** (`trace`): every document the YAML store accepts
//! - **List expansion** (`trace`): each List popped from the work queue and its item count
//! - **Entry points** (`debug`): resource counts per call and per patch file
//! - **Failures** (`warn`): the patch path or generator name plus the error
//!
//! ## Usage Examples
//!
//! ```bash
//! # Entry points and failures
//! RUST_LOG=debug cargo test
//!
//! # Every document and List expansion
//! RUST_LOG=resource_factory=trace cargo test
//! ```
//!
//! With `RUST_LOG=debug`, loading two patches looks like:
//!
//! ```text
//! DEBUG slice_from_patches: Flattened patches=2 count=1
//! DEBUG slice_from_patches: Patch loaded patches=2 path=service.yaml count=1
//! DEBUG slice_from_patches: Flattened patches=2 count=3
//! DEBUG slice_from_patches: Patch loaded patches=2 path=list.yaml count=3
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Panics if a global subscriber is already set.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
