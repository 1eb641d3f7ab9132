//! Log output for the simulator binary.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber on stderr.
///
/// `RUST_LOG` is honoured unless `verbose` is set, which forces `debug`. Otherwise the default is
/// `info`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
