//! Logging initialization
//!
//! Uses the tracing ecosystem with an environment-variable override
//! (`MCPHUB_LOG`) for module-level filtering.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// # Environment Variables
/// - `MCPHUB_LOG`: override the filter (e.g. "mcphub=debug,rmcp=info")
pub fn init() {
    let env_filter =
        EnvFilter::try_from_env("MCPHUB_LOG").unwrap_or_else(|_| EnvFilter::new("mcphub=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
