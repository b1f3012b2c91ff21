use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so stdout stays a clean render surface for the message
/// timeline. The filter comes from `SKIFF_LOG` when set.
pub fn init(default_filter: &str) -> Result<(), String> {
    let filter = EnvFilter::try_from_env("SKIFF_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| err.to_string())
}
