//! Opt-in tracing bootstrap for hosts embedding the dashboard.
//!
//! Nothing here runs unless the `telemetry` cargo feature is enabled and
//! the host calls [`init_default_tracing`]; applications with their own
//! `tracing` subscriber simply skip this module.

#[cfg(feature = "telemetry")]
use tracing_subscriber::EnvFilter;

/// Installs a compact stderr subscriber honoring `RUST_LOG`, defaulting to
/// `info` when the variable is unset or unparsable.
///
/// Returns whether a subscriber was installed; `false` when the feature is
/// disabled or another global subscriber won the race.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
