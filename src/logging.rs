use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber used by the binaries.
///
/// `RUST_LOG` wins when set; otherwise `-v` raises the level from `warn` to
/// `info`, `-vv` to `debug`.
pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
