use std::io;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a stderr `fmt` subscriber for the CLI.
///
/// Respects `RUST_LOG` if set, otherwise logs at `warn` (or `debug` when
/// `verbose`). Safe to call more than once.
pub fn init_logging(verbose: bool) {
	let fallback = if verbose { "debug" } else { "warn" };
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
	let _ = fmt()
		.with_env_filter(env_filter)
		.with_target(false)
		.compact()
		.with_writer(io::stderr)
		.try_init();
}
