//! Ordered table of recognised host prefixes and their canonical forms.
//!
//! The order of [`HostTable::default`] matters. Each rule is tried in turn and
//! the first one that matches wins:
//!
//! - GitHub URLs come before the generic scheme rules so that `http://github.com/`
//!   is upgraded and `ssh://github.com/` becomes the scp form.
//! - Scheme rules come before the bare `github.com` rules; a bare `github.com:`
//!   is a shorthand for https and must not reach the scp rule.
//! - `gh:` comes before `git@` only for readability; the prefixes are disjoint.
//! - A leading `git::` is not a table entry. It is peeled off before the table
//!   is consulted, so `git::https://...` never matches as an org/repo.

use tracing::debug;

/// Terraform-style forced-getter prefix.
pub const GIT_FORCE_PREFIX: &str = "git::";

/// One entry of the host table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRule {
    /// A literal prefix replaced by a fixed canonical host.
    Fixed { raw: String, normalized: String },
    /// A URL scheme followed by an authority running to the next `/`.
    Authority { scheme: String, normalized: String },
    /// scp-like `user@host:` or `user@host/`, optionally `user@host:port/`.
    Scp { user: String },
}

impl HostRule {
    pub fn fixed(raw: impl Into<String>, normalized: impl Into<String>) -> Self {
        Self::Fixed {
            raw: raw.into(),
            normalized: normalized.into(),
        }
    }

    pub fn authority(scheme: impl Into<String>, normalized: impl Into<String>) -> Self {
        Self::Authority {
            scheme: scheme.into(),
            normalized: normalized.into(),
        }
    }

    pub fn scp(user: impl Into<String>) -> Self {
        Self::Scp { user: user.into() }
    }

    /// Try this rule against the start of `input`.
    fn apply<'a>(&self, input: &'a str) -> Option<HostMatch<'a>> {
        match self {
            Self::Fixed { raw, normalized } => {
                let rest = strip_prefix_ignore_case(input, raw)?;
                Some(HostMatch::new(normalized.clone(), rest))
            }
            Self::Authority { scheme, normalized } => {
                let rest = strip_prefix_ignore_case(input, scheme)?;
                let (authority, remainder) = match rest.find('/') {
                    Some(i) => (&rest[..i], &rest[i + 1..]),
                    None => (rest, ""),
                };
                if authority.is_empty() {
                    return None;
                }
                let host = format!("{normalized}{}/", lowercase_domain(authority));
                Some(HostMatch::new(host, remainder))
            }
            Self::Scp { user } => {
                let rest = strip_prefix_ignore_case(input, user)?;
                let Some(i) = rest.find([':', '/']) else {
                    if rest.is_empty() {
                        return None;
                    }
                    return Some(HostMatch::new(
                        format!("{user}{}:", rest.to_ascii_lowercase()),
                        "",
                    ));
                };
                let domain = &rest[..i];
                if domain.is_empty() {
                    return None;
                }
                let domain = domain.to_ascii_lowercase();
                let after = &rest[i + 1..];
                if rest[i..].starts_with(':') {
                    if let Some((port, remainder)) = split_port(after) {
                        return Some(HostMatch::new(
                            format!("{user}{domain}:{port}/"),
                            remainder,
                        ));
                    }
                    // git@host:/abs/path keeps the root slash with the host.
                    if let Some(remainder) = after.strip_prefix('/') {
                        return Some(HostMatch::new(format!("{user}{domain}:/"), remainder));
                    }
                }
                Some(HostMatch::new(format!("{user}{domain}:"), after))
            }
        }
    }
}

/// A recognised host and whatever follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMatch<'a> {
    pub host: String,
    pub remainder: &'a str,
}

impl<'a> HostMatch<'a> {
    fn new(host: String, remainder: &'a str) -> Self {
        Self { host, remainder }
    }
}

/// Ordered list of host rules; first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTable {
    rules: Vec<HostRule>,
}

impl Default for HostTable {
    fn default() -> Self {
        Self::new(vec![
            HostRule::fixed("https://github.com/", "https://github.com/"),
            HostRule::fixed("http://github.com/", "https://github.com/"),
            HostRule::fixed("ssh://git@github.com/", "git@github.com:"),
            HostRule::fixed("ssh://github.com/", "git@github.com:"),
            HostRule::authority("https://", "https://"),
            HostRule::authority("http://", "http://"),
            HostRule::authority("ssh://", "ssh://"),
            HostRule::fixed("github.com/", "https://github.com/"),
            HostRule::fixed("github.com:", "https://github.com/"),
            HostRule::fixed("gh:", "gh:"),
            HostRule::scp("git@"),
        ])
    }
}

impl HostTable {
    pub fn new(rules: Vec<HostRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[HostRule] {
        &self.rules
    }

    /// Strip and normalise the host prefix of `input`.
    ///
    /// Any number of leading `git::` wrappers are removed first. Returns `None`
    /// when no rule matches.
    pub fn normalize<'a>(&self, input: &'a str) -> Option<HostMatch<'a>> {
        if let Some(inner) = strip_prefix_ignore_case(input, GIT_FORCE_PREFIX) {
            debug!(input, "unwrapping git:: prefix");
            return self.normalize(inner);
        }
        let found = self.rules.iter().find_map(|rule| rule.apply(input));
        if let Some(m) = &found {
            debug!(host = %m.host, remainder = m.remainder, "matched host prefix");
        }
        found
    }

    /// Remove the host prefix of `input`, leaving the whole input when nothing matches.
    pub fn strip<'a>(&self, input: &'a str) -> (Option<String>, &'a str) {
        match self.normalize(input) {
            Some(HostMatch { host, remainder }) => (Some(host), remainder),
            None => (None, strip_force_prefix(input)),
        }
    }
}

fn strip_force_prefix(mut input: &str) -> &str {
    while let Some(inner) = strip_prefix_ignore_case(input, GIT_FORCE_PREFIX) {
        input = inner;
    }
    input
}

fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &input[prefix.len()..])
}

/// `digits/rest` -> `(digits, rest)`.
fn split_port(s: &str) -> Option<(&str, &str)> {
    let (port, rest) = s.split_once('/')?;
    (!port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())).then_some((port, rest))
}

// Only the domain is case-insensitive; keep any userinfo as written.
fn lowercase_domain(authority: &str) -> String {
    match authority.rsplit_once('@') {
        Some((user, domain)) => format!("{user}@{}", domain.to_ascii_lowercase()),
        None => authority.to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("gh:", "gh:")]
    #[case("GH:", "gh:")]
    #[case("gitHub.com/", "https://github.com/")]
    #[case("github.com:", "https://github.com/")]
    #[case("http://github.com/", "https://github.com/")]
    #[case("https://github.com/", "https://github.com/")]
    #[case("hTTps://github.com/", "https://github.com/")]
    #[case("ssh://github.com/", "git@github.com:")]
    #[case(
        "https://git-codecommit.us-east-2.amazonaws.com/",
        "https://git-codecommit.us-east-2.amazonaws.com/"
    )]
    #[case(
        "https://fabrikops2.visualstudio.com/",
        "https://fabrikops2.visualstudio.com/"
    )]
    #[case("ssh://git.example.com:7999/", "ssh://git.example.com:7999/")]
    #[case("git::https://gitlab.com/", "https://gitlab.com/")]
    #[case("git::http://git.example.com/", "http://git.example.com/")]
    #[case("git::https://git.example.com/", "https://git.example.com/")]
    #[case("GIT::git::https://git.example.com/", "https://git.example.com/")]
    #[case("git@github.com:", "git@github.com:")]
    #[case("git@github.com/", "git@github.com:")]
    #[case("git@gitlab2.sqtools.ru:10022/", "git@gitlab2.sqtools.ru:10022/")]
    fn test_should_normalize_host(#[case] raw: &str, #[case] normalized: &str) {
        let table = HostTable::default();
        let input = format!("{raw}someOrg/someRepo");
        let m = table.normalize(&input).unwrap();
        assert_eq!(m.host, normalized);
        assert_eq!(m.remainder, "someOrg/someRepo");
    }

    #[rstest]
    #[case("gh:")]
    #[case("https://github.com/")]
    #[case("https://gitlab.com/")]
    #[case("http://git.example.com/")]
    #[case("ssh://git.example.com:7999/")]
    #[case("git@github.com:")]
    #[case("git@gitlab2.sqtools.ru:10022/")]
    #[case("git@example.com:/")]
    fn test_should_be_idempotent(#[case] host: &str) {
        let table = HostTable::default();
        let input = format!("{host}org/repo");
        assert_eq!(table.normalize(&input).unwrap().host, host);
    }

    #[rstest]
    #[case("htxxxtp://github.com/")]
    #[case("iauhsdiuashduas")]
    #[case("gitlab.com/org/repo")]
    #[case("https:///org/repo")]
    fn test_should_not_match_unknown_host(#[case] input: &str) {
        assert!(HostTable::default().normalize(input).is_none());
    }

    #[test]
    fn test_should_keep_whole_input_when_scheme_has_no_path() {
        let m = HostTable::default()
            .normalize("ssh://git.example.com")
            .unwrap();
        assert_eq!(m.host, "ssh://git.example.com/");
        assert_eq!(m.remainder, "");
    }

    #[test]
    fn test_should_treat_non_numeric_scp_segment_as_path() {
        let m = HostTable::default()
            .normalize("git@bitbucket.org:company/project.git")
            .unwrap();
        assert_eq!(m.host, "git@bitbucket.org:");
        assert_eq!(m.remainder, "company/project.git");
    }

    #[test]
    fn test_should_keep_scp_root_slash_in_host() {
        let m = HostTable::default()
            .normalize("git@example.com:/srv/repo.git")
            .unwrap();
        assert_eq!(m.host, "git@example.com:/");
        assert_eq!(m.remainder, "srv/repo.git");
    }

    #[test]
    fn test_should_keep_ssh_userinfo_case() {
        let m = HostTable::default()
            .normalize("ssh://Deploy@Git.Example.com/org/repo")
            .unwrap();
        assert_eq!(m.host, "ssh://Deploy@git.example.com/");
    }

    #[test]
    fn test_should_strip_force_prefix_when_unmatched() {
        let (host, rest) = HostTable::default().strip("git::___");
        assert!(host.is_none());
        assert_eq!(rest, "___");
    }

    #[test]
    fn test_should_use_custom_table() {
        let table = HostTable::new(vec![HostRule::fixed("gl:", "https://gitlab.com/")]);
        let m = table.normalize("gl:org/repo").unwrap();
        assert_eq!(m.host, "https://gitlab.com/");
        assert!(table.normalize("gh:org/repo").is_none());
    }
}
