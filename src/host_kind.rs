//! Classification of hosts whose URL layout differs from the usual `org/repo`.

/// Marker segment Azure DevOps puts in front of the repository name.
pub const AZURE_GIT_MARKER: &str = "_git";

/// Host dialects that need their own splitting or clone-spec rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostKind {
    /// GitHub, GitLab, Bitbucket, any other https/ssh/scp host.
    #[default]
    Generic,
    /// Azure DevOps, VisualStudio Team Services, on-premise TFS.
    Azure,
    /// AWS CodeCommit.
    AwsCodeCommit,
}

impl HostKind {
    /// Classify a normalised host. `remainder` is the text following the host;
    /// a `_git/<repo>` pair in it marks an on-premise Azure DevOps server.
    pub fn classify(host: &str, remainder: &str) -> Self {
        let host = host.to_ascii_lowercase();
        if is_azure_host(&host) || has_azure_marker(remainder) {
            Self::Azure
        } else if is_aws_host(&host) {
            Self::AwsCodeCommit
        } else {
            Self::Generic
        }
    }

    /// Whether clone specs for this kind get a `.git` suffix.
    pub fn wants_git_suffix(self) -> bool {
        matches!(self, Self::Generic)
    }
}

/// See <https://docs.microsoft.com/en-us/azure/devops/repos/git/clone>.
pub fn is_azure_host(host: &str) -> bool {
    host.contains("dev.azure.com") || host.contains("visualstudio.com")
}

/// See <https://docs.aws.amazon.com/codecommit/latest/userguide/regions.html>.
pub fn is_aws_host(host: &str) -> bool {
    host.contains("amazonaws.com") && host.contains("codecommit")
}

fn has_azure_marker(remainder: &str) -> bool {
    let segments: Vec<&str> = remainder.split('/').collect();
    segments
        .windows(2)
        .any(|w| w[0] == AZURE_GIT_MARKER && !w[1].is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://git-codecommit.us-east-2.amazonaws.com", false)]
    #[case("ssh://git-codecommit.us-east-2.amazonaws.com", false)]
    #[case("https://fabrikops2.visualstudio.com/", true)]
    #[case("https://dev.azure.com/myorg/myproject/", true)]
    fn test_should_detect_azure_host(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_azure_host(input), expected);
    }

    #[rstest]
    #[case("https://git-codecommit.us-east-2.amazonaws.com", true)]
    #[case("ssh://git-codecommit.us-east-2.amazonaws.com", true)]
    #[case("https://s3.amazonaws.com/", false)]
    #[case("git@github.com:", false)]
    #[case("http://github.com/", false)]
    fn test_should_detect_aws_host(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_aws_host(input), expected);
    }

    #[rstest]
    #[case("https://github.com/", "org/repo", HostKind::Generic)]
    #[case("https://dev.azure.com/", "org/project/_git/repo", HostKind::Azure)]
    #[case("https://itfs.mycompany.com/", "coll/proj/_git/repo", HostKind::Azure)]
    #[case("https://itfs.mycompany.com/", "coll/proj/_git/", HostKind::Generic)]
    #[case(
        "https://git-codecommit.us-east-2.amazonaws.com/",
        "v1/repos/repo",
        HostKind::AwsCodeCommit
    )]
    #[case(
        "https://GIT-CODECOMMIT.us-east-2.amazonaws.com/",
        "v1/repos/repo",
        HostKind::AwsCodeCommit
    )]
    fn test_should_classify_host(
        #[case] host: &str,
        #[case] remainder: &str,
        #[case] expected: HostKind,
    ) {
        assert_eq!(HostKind::classify(host, remainder), expected);
    }

    #[test]
    fn test_should_only_suffix_generic_hosts() {
        assert!(HostKind::Generic.wants_git_suffix());
        assert!(!HostKind::Azure.wants_git_suffix());
        assert!(!HostKind::AwsCodeCommit.wants_git_suffix());
    }
}
