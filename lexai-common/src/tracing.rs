//! Tracing initialization for LexAI binaries.
//!
//! Log filtering is controlled by `RUST_LOG`, for example:
//! - `RUST_LOG=debug` shows every resolved setting
//! - `RUST_LOG=warn,lexai_common=debug` keeps other crates quiet
//!
//! Secret values are never recorded by this crate, at any level.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Level used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialize the global subscriber, defaulting to `info`.
///
/// # Panics
///
/// Panics if a global subscriber is already set.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_LOG_LEVEL);
}

/// Initialize the global subscriber with a custom default level.
///
/// # Panics
///
/// Panics if a global subscriber is already set.
pub fn init_tracing_with_default(default_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(fmt_layer())
        .init();
}

/// Try to initialize tracing, returning an error if already initialized.
///
/// ```
/// use lexai_common::tracing::try_init_tracing;
///
/// // Ok or Err depending on whether a subscriber was set earlier.
/// let _ = try_init_tracing();
/// ```
pub fn try_init_tracing() -> Result<(), ()> {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_LOG_LEVEL))
        .with(fmt_layer())
        .try_init()
        .map_err(|_| ())
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn fmt_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: ::tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_tracing_does_not_panic() {
        let _ = try_init_tracing();
        // A second attempt must fail quietly instead of panicking.
        assert!(try_init_tracing().is_err());
    }

    #[test]
    fn test_env_filter_parses_module_specific() {
        let filter = EnvFilter::new("warn,lexai_common=debug");
        assert!(filter.to_string().contains("lexai_common=debug"));
    }
}
