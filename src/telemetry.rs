//! Opt-in log output for hosts embedding `wx-boxchart`.
//!
//! Chart builds log through `tracing`; this module only decides who listens.
//! Row rejections and illegible axis scales are `warn`, build planning is
//! `debug`, per-sample clamping is `trace`.

/// Directives used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVES: &str = "info";

/// Installs a compact global subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_DIRECTIVES`].
///
/// `false` when the `telemetry` feature is off or a subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_DIRECTIVES)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback, e.g.
/// `"wx_boxchart=trace"` to see every clamped sample.
///
/// Unparsable `fallback` directives install nothing and return `false`.
#[cfg(feature = "telemetry")]
#[must_use]
pub fn init_tracing(fallback: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match EnvFilter::try_new(fallback) {
            Ok(filter) => filter,
            Err(_) => return false,
        },
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(not(feature = "telemetry"))]
#[must_use]
pub fn init_tracing(_fallback: &str) -> bool {
    false
}
