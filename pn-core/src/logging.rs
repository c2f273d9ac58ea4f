use tracing_subscriber::EnvFilter;

/// Install the process-wide `tracing` subscriber.
///
/// `env_filter` is used as the default directive (e.g. `info` or `pn_gen=debug`); a `RUST_LOG`
/// variable in the environment takes precedence over it.
pub fn setup(env_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .compact()
        .init();
}
