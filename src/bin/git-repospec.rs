use anyhow::Result;
use clap::Parser;
use git_repospec::commands::{describe, origin};
use git_repospec::{ParserConfig, RepoSpecParser, expand_tilde, get_base_dir, logging};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "git-repospec")]
#[command(
    about = "Parse a remote git repository locator into its clone URL, ref, and subdirectory."
)]
#[command(version)]
#[command(after_help = "Examples:
  git repospec gh:kubernetes/website/content?ref=main
  git repospec git@bitbucket.org:company/project.git//path?ref=branch
  git repospec https://dev.azure.com/org/project/_git/repo/base
  git repospec -d path/to/dump/file
  git repospec --origin path/to/checkout")]
struct Cli {
    /// Repository locator to parse
    #[arg(value_name = "LOCATOR")]
    locator: Option<String>,

    /// Path to a dump file listing locators to parse. Ignored when <LOCATOR> argument is used
    #[arg(short, long)]
    dump: Option<String>,

    /// Describe the origin remote of an existing checkout
    #[arg(long, value_name = "DIR")]
    origin: Option<String>,

    /// Directory the locator's subpath is resolved against (defaults to $GIT_PATH)
    #[arg(short, long)]
    root: Option<String>,

    /// Timeout in seconds used when the locator has no valid timeout
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Don't clone submodules unless the locator asks for them
    #[arg(long)]
    no_submodules: bool,
}

fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    let base_dir = get_base_dir(cli.root).unwrap_or_else(|_| "~/repositories".to_string());
    let base_dir = expand_tilde(&base_dir);

    let mut parser_config = ParserConfig::default().with_default_submodules(!cli.no_submodules);
    if let Some(secs) = cli.timeout {
        parser_config = parser_config.with_default_timeout(Duration::from_secs(secs));
    }

    let config = describe::Config {
        base_dir,
        parser: RepoSpecParser::new(parser_config),
    };

    if let Some(locator) = cli.locator {
        describe::execute(&locator, &config)
    } else if let Some(dump_file) = cli.dump {
        let report = describe::execute_dump(&dump_file, &config)?;
        if report.failed > 0 {
            std::process::exit(1);
        }
        Ok(())
    } else if let Some(repo_path) = cli.origin {
        origin::execute(&repo_path, &config)
    } else {
        eprintln!(
            "Error: Either provide a repository locator, use -d with a dump file, or --origin with a checkout"
        );
        std::process::exit(1);
    }
}
