//! Logging setup based on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Default directives used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,dropline=debug";

/// Install a global fmt subscriber.
///
/// Honors `RUST_LOG` when present, otherwise falls back to [`DEFAULT_FILTER`].
/// Calling this twice is harmless; the second install is ignored.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install a global fmt subscriber with explicit fallback directives.
pub fn init_with_filter(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
