//! Logging init for the command-line tool.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `git_repospec=debug`.
pub const LOG_ENV: &str = "GIT_REPOSPEC_LOG";

/// Log to stderr, filtered by `$GIT_REPOSPEC_LOG` (default `warn`).
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();
}
