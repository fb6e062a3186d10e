//! Diagnostic logging to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `FORMKIT_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "warn";

/// Pick the log filter: `FORMKIT_LOG`, then the config's `[log] filter`,
/// then [`DEFAULT_FILTER`].
pub fn resolve_filter(env_value: Option<String>, config_filter: Option<&str>) -> String {
    env_value
        .filter(|value| !value.trim().is_empty())
        .or_else(|| config_filter.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the global subscriber; later calls are ignored.
pub fn init(config_filter: Option<&str>) {
    let directives = resolve_filter(std::env::var("FORMKIT_LOG").ok(), config_filter);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
