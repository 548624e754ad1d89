//! Tracing setup for the binary.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins when it is set; otherwise `default_level` (for example `info` or
/// `storefront=debug,actor_framework=debug`) is used as the filter.
///
/// ```bash
/// RUST_LOG=info cargo run      # Compact logs
/// RUST_LOG=debug cargo run     # Full payloads
/// ```
pub fn setup_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type already says which store logged
        .compact()
        .init();
}
