use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MEMBER_METRICS_LOG";

/// Install a stderr fmt subscriber filtered by `MEMBER_METRICS_LOG`, falling
/// back to `default_filter`. Returns false when a global subscriber is
/// already set, in which case that one stays in place.
pub fn init_logging(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
