use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter, e.g. `WINE_REPORT_LOG=wine_report=debug`
pub const LOG_ENV: &str = "WINE_REPORT_LOG";

/// Install the global subscriber. Logs go to stderr so report output on stdout stays clean.
pub fn init(verbose: bool) {
    let default = if verbose { "wine_report=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .ok();
}
