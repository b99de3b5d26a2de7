//! Divides the text after the host into the repository and a path inside it.

use std::borrow::Cow;

use crate::host_kind::{AZURE_GIT_MARKER, HostKind};

pub const GIT_SUFFIX: &str = ".git";

/// Explicit boundary between repository and subdirectory, as in
/// `git@host:org/repo.git//some/dir`.
pub const PATH_MARKER: &str = "//";

const CODECOMMIT_REPOS_PREFIX: &str = "v1/repos/";

/// Split a host-stripped, query-free remainder into `(org_repo, path)`.
///
/// `org_repo` is empty when the remainder names no repository; `path` never
/// starts with `/`.
pub fn split_org_repo(kind: HostKind, remainder: &str) -> (&str, Cow<'_, str>) {
    match kind {
        HostKind::Generic => split_generic(remainder),
        HostKind::Azure => split_azure(remainder),
        HostKind::AwsCodeCommit => split_codecommit(remainder),
    }
}

fn split_generic(remainder: &str) -> (&str, Cow<'_, str>) {
    if let Some((head, tail)) = remainder.split_once(PATH_MARKER) {
        let tail = tail.trim_start_matches('/');
        // org/repo.git/sub//dir: the repository ends at the .git segment.
        if let Some(end) = git_suffix_end(head) {
            let between = head[end..].trim_matches('/');
            let path = match (between.is_empty(), tail.is_empty()) {
                (true, _) => Cow::Borrowed(tail),
                (false, true) => Cow::Borrowed(between),
                (false, false) => Cow::Owned(format!("{between}/{tail}")),
            };
            return (&head[..end - GIT_SUFFIX.len()], path);
        }
        return (head.trim_end_matches('/'), Cow::Borrowed(tail));
    }
    if let Some(end) = git_suffix_end(remainder) {
        let org_repo = &remainder[..end - GIT_SUFFIX.len()];
        return (org_repo, Cow::Borrowed(remainder[end..].trim_start_matches('/')));
    }
    split_segments(remainder, 2)
}

// collection/project/_git/repo[/path]
fn split_azure(remainder: &str) -> (&str, Cow<'_, str>) {
    let mut offset = 0;
    let mut segments = remainder.split('/').peekable();
    while let Some(segment) = segments.next() {
        offset += segment.len() + 1;
        if segment != AZURE_GIT_MARKER {
            continue;
        }
        match segments.peek() {
            Some(repo) if !repo.is_empty() => {
                let end = offset + repo.len();
                let path = remainder.get(end..).unwrap_or("");
                return (&remainder[..end], Cow::Borrowed(path.trim_start_matches('/')));
            }
            _ => break,
        }
    }
    split_generic(remainder)
}

// v1/repos/name[/path]
fn split_codecommit(remainder: &str) -> (&str, Cow<'_, str>) {
    let Some(rest) = remainder.strip_prefix(CODECOMMIT_REPOS_PREFIX) else {
        return split_generic(remainder);
    };
    let name_len = rest.find('/').unwrap_or(rest.len());
    if name_len == 0 {
        return ("", Cow::Borrowed(remainder));
    }
    let end = CODECOMMIT_REPOS_PREFIX.len() + name_len;
    (
        &remainder[..end],
        Cow::Borrowed(remainder[end..].trim_start_matches('/')),
    )
}

/// The first `count` segments are the repository; both must be non-empty.
fn split_segments(remainder: &str, count: usize) -> (&str, Cow<'_, str>) {
    let mut end = 0;
    for (i, segment) in remainder.split('/').take(count).enumerate() {
        if segment.is_empty() {
            return ("", Cow::Borrowed(remainder));
        }
        end += segment.len() + usize::from(i > 0);
        if i + 1 == count {
            let path = remainder.get(end + 1..).unwrap_or("");
            return (&remainder[..end], Cow::Borrowed(path.trim_start_matches('/')));
        }
    }
    ("", Cow::Borrowed(remainder))
}

/// Byte offset just past the first segment ending in `.git`.
fn git_suffix_end(s: &str) -> Option<usize> {
    let mut offset = 0;
    for segment in s.split('/') {
        offset += segment.len();
        if segment.len() > GIT_SUFFIX.len() && segment.ends_with(GIT_SUFFIX) {
            return Some(offset);
        }
        offset += 1;
    }
    None
}
