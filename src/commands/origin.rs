use crate::commands::describe::{self, Config};
use anyhow::{Context, Result};
use std::path::Path;

const ORIGIN: &str = "origin";

/// Fetch URL of the `origin` remote of the checkout at `repo_path`.
pub fn origin_url(repo_path: &Path) -> Result<String> {
    let repo = gix::open(repo_path)
        .with_context(|| format!("Failed to open repository at {}", repo_path.display()))?;
    let remote = repo
        .find_remote(ORIGIN)
        .context("Repository has no origin remote")?;
    let url = remote
        .url(gix::remote::Direction::Fetch)
        .ok_or_else(|| anyhow::anyhow!("Remote {ORIGIN} has no fetch URL"))?;
    Ok(url.to_bstring().to_string())
}

/// Describe the locator an existing checkout was cloned from.
pub fn execute(repo_path: &str, config: &Config) -> Result<()> {
    let url = origin_url(Path::new(repo_path))?;
    tracing::debug!(%url, "read origin url");
    describe::execute(&url, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_fail_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = origin_url(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to open repository"));
    }

    #[test]
    fn test_should_read_origin_url() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        gix::init(dir.path()).unwrap();
        let mut config = std::fs::OpenOptions::new()
            .append(true)
            .open(dir.path().join(".git").join("config"))
            .unwrap();
        write!(
            config,
            "[remote \"origin\"]\n\turl = https://github.com/org/repo.git\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n"
        )
        .unwrap();
        drop(config);

        assert_eq!(
            origin_url(dir.path()).unwrap(),
            "https://github.com/org/repo.git"
        );
    }
}
