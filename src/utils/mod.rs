use std::io;

const DEFAULT_DIRECTIVES: &str = "budget_buddy=info,buddy_core=info,buddy_storage_json=info";

/// Installs the global subscriber. `RUST_LOG` replaces the default directives.
///
/// Output goes to stderr so command output on stdout stays machine readable.
/// Called once through [`crate::init`].
pub(crate) fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    // Another subscriber may already be installed (e.g. by a test harness).
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
