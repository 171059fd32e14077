//! Telemetry helpers for applications embedding `svg-charts`.
//!
//! The library only emits `tracing` events (mount, render passes, option
//! merges, skipped flow links, degenerate scales). Installing a subscriber is
//! left to the host: call `init_default_tracing` or wire your own.

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "svg_charts=info";

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
