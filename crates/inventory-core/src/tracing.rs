//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging for the whole application.
//!
//! The coordinator logs every state change with structured fields, so a compact format
//! without module targets stays readable:
//!
//! ```text
//! INFO Inventory coordinator started
//! INFO Reloaded size=12
//! INFO Added (provisional) id="1760601234567" size=13
//! WARN Store unreachable id="1760601234567" operation="create" error=Store responded with status 500
//! INFO Add rolled back id="1760601234567" size=12
//! ```
//!
//! Levels come from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run     # state changes
//! RUST_LOG=debug cargo run    # full payloads and confirmations
//! ```

/// Installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
