//! Structured logging setup
//!
//! Logs go to stderr so they never mix with generated output on stdout.

use crate::gherkin::config::DebugFlags;
use tracing_subscriber::EnvFilter;

fn filter_from_flags(flags: &DebugFlags) -> EnvFilter {
    EnvFilter::new(flags.filter_directives())
}

/// Install a stderr subscriber enabling debug events for the flagged
/// subsystems. If a global subscriber is already set this does nothing.
pub fn init_logging(flags: &DebugFlags) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_flags(flags))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .finish();

    // First subscriber wins
    let _ = tracing::subscriber::set_global_default(subscriber);
}
