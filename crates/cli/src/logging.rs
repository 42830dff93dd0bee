use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: u8) {
    // Allow RUST_LOG overrides, fall back to flag-controlled level
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Log records go to stdout; the exit status carries the machine-readable
    // outcome.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(true)
        .compact()
        .init();
}
