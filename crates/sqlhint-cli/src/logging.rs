//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber when `--verbose` is given or `RUST_LOG` is set.
///
/// `RUST_LOG` takes precedence; `--verbose` alone enables debug output for the
/// sqlhint crates.
pub fn init(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("sqlhint_core=debug,sqlhint_cli=debug,sqlhint=debug"),
        Err(_) => return,
    };

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
