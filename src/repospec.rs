use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use crate::config::ParserConfig;
use crate::errors::RepoSpecError;
use crate::host_kind::HostKind;
use crate::query::peel_query;
use crate::splitter::{GIT_SUFFIX, split_org_repo};

/// A parsed repository locator.
///
/// `host + org_repo` names the repository, `path` is a directory inside it and
/// the remaining fields are clone options taken from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    raw: String,
    host: String,
    org_repo: String,
    path: String,
    git_ref: String,
    submodules: bool,
    timeout: Duration,
    kind: HostKind,
}

impl RepoSpec {
    /// The locator as it was given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalised host prefix, e.g. `https://github.com/` or `git@github.com:`.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn org_repo(&self) -> &str {
        &self.org_repo
    }

    /// Directory inside the repository; empty for the repository root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Branch, tag or commit to check out; empty for the remote's default.
    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    pub fn submodules(&self) -> bool {
        self.submodules
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The URL to hand to `git clone`.
    ///
    /// Generic hosts get a `.git` suffix; Azure and CodeCommit URLs are used
    /// as written.
    pub fn clone_spec(&self) -> String {
        let mut spec = format!("{}{}", self.host, self.org_repo);
        if self.kind.wants_git_suffix() && !self.org_repo.ends_with(GIT_SUFFIX) {
            spec.push_str(GIT_SUFFIX);
        }
        spec
    }

    /// `clone_dir` joined with [`path`](Self::path), or `clone_dir` itself
    /// when the locator points at the repository root.
    pub fn abs_path(&self, clone_dir: impl AsRef<Path>) -> PathBuf {
        let clone_dir = clone_dir.as_ref();
        if self.path.is_empty() {
            clone_dir.to_path_buf()
        } else {
            clone_dir.join(&self.path)
        }
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for RepoSpec {
    type Err = RepoSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_repo_spec(s)
    }
}

/// Parses locators against a fixed [`ParserConfig`].
#[derive(Debug, Clone, Default)]
pub struct RepoSpecParser {
    config: ParserConfig,
}

impl RepoSpecParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, raw: &str) -> Result<RepoSpec, RepoSpecError> {
        let raw = raw.trim();
        if looks_like_abs_path(raw) {
            return Err(RepoSpecError::AbsolutePath(raw.to_string()));
        }

        let peeled = peel_query(raw, &self.config);
        let (host, remainder) = self.config.host_table.strip(peeled.path);
        let kind = host
            .as_deref()
            .map_or(HostKind::Generic, |h| HostKind::classify(h, remainder));
        let (org_repo, path) = split_org_repo(kind, remainder);

        // An empty org/repo is reported even when the host is missing too.
        if org_repo.is_empty() {
            return Err(RepoSpecError::MissingOrgRepo(raw.to_string()));
        }
        let Some(host) = host else {
            return Err(RepoSpecError::MissingHost(raw.to_string()));
        };

        debug!(raw, %host, %org_repo, %path, ?kind, git_ref = %peeled.git_ref, "parsed repo spec");

        Ok(RepoSpec {
            raw: raw.to_string(),
            host,
            org_repo: org_repo.to_string(),
            path: path.to_string(),
            git_ref: peeled.git_ref,
            submodules: peeled.submodules,
            timeout: peeled.timeout,
            kind,
        })
    }
}

/// Parse with the default host table and option defaults.
pub fn parse_repo_spec(raw: &str) -> Result<RepoSpec, RepoSpecError> {
    RepoSpecParser::default().parse(raw)
}

fn looks_like_abs_path(raw: &str) -> bool {
    raw.starts_with('/') || Path::new(raw).is_absolute()
}
