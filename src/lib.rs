use anyhow::Result;
use std::env;

pub mod commands;
pub mod config;
pub mod errors;
pub mod host_kind;
pub mod host_table;
pub mod logging;
pub mod query;
pub mod repospec;
pub mod splitter;

pub use config::ParserConfig;
pub use errors::RepoSpecError;
pub use repospec::{RepoSpec, RepoSpecParser, parse_repo_spec};

/// Directory a locator's subpath is resolved against: the given one, else `$GIT_PATH`.
pub fn get_base_dir(provided_dir: Option<String>) -> Result<String> {
    match provided_dir {
        Some(dir) => Ok(dir),
        None => env::var("GIT_PATH")
            .map_err(|_| anyhow::anyhow!("GIT_PATH environment variable not set")),
    }
}

/// Replace a leading `~/` with `$HOME`.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = env::var("HOME") {
            return format!("{home}/{rest}");
        }
    }
    path.to_string()
}
