//! Tracing subscriber setup for applications embedding this crate.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "campus_connect=info"
    } else {
        "campus_connect=warn"
    }
}

/// Install a global fmt subscriber filtered by `RUST_LOG`.
///
/// Returns false if a global subscriber was already installed.
pub fn init(verbose: bool) -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
