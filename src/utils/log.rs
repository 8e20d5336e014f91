use env_logger::Env;

/// Sets up the global logger.
///
/// The filter is read from `RUST_LOG`, falling back to `info` when unset.
pub fn bootstrap_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
