//! Errors produced while parsing a repository locator.

/// Reasons a locator cannot be turned into a [`RepoSpec`](crate::repospec::RepoSpec).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoSpecError {
    /// The input has no host and reads like a local absolute path.
    #[error("uri looks like abs path: {0}")]
    AbsolutePath(String),

    /// A host may have been found, but nothing names the repository.
    #[error("url lacks orgRepo: {0}")]
    MissingOrgRepo(String),

    /// No entry of the host table matches the start of the input.
    #[error("url lacks host: {0}")]
    MissingHost(String),
}

impl RepoSpecError {
    /// The raw locator that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::AbsolutePath(raw) | Self::MissingOrgRepo(raw) | Self::MissingHost(raw) => raw,
        }
    }
}
