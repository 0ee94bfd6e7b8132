//! Telemetry helpers for hosts embedding `weather-chart`.
//!
//! The card only emits `tracing` events; installing a subscriber is left to
//! the host unless it opts into `init_default_tracing`.

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when a subscriber was installed by this call.
/// Returns `false` when the feature is disabled or the host already installed
/// a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
