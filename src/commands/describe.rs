use crate::repospec::{RepoSpec, RepoSpecParser};
use anyhow::{Context, Result};
use std::fs;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub struct Config {
    pub base_dir: String,
    pub parser: RepoSpecParser,
}

/// Outcome of describing a dump file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpReport {
    pub parsed: usize,
    pub failed: usize,
}

pub fn execute(locator: &str, config: &Config) -> Result<()> {
    let spec = config
        .parser
        .parse(locator)
        .context("Failed to parse repository locator")?;
    print!("{}", render(&spec, &config.base_dir));
    Ok(())
}

pub fn execute_dump(dump_file: &str, config: &Config) -> Result<DumpReport> {
    let content = fs::read_to_string(dump_file).context("Failed to read dump file")?;
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    describe_dump(&content, config, &mut stdout)
}

/// Describe every `<locator> [ref]` line of `content`, skipping blanks and
/// `#` comments. Failures are reported and counted, not returned.
pub fn describe_dump(
    content: &str,
    config: &Config,
    out: &mut impl WriteColor,
) -> Result<DumpReport> {
    let mut report = DumpReport::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(locator) = parts.next() else { continue };
        let locator = match parts.next() {
            Some(git_ref) => with_ref(locator, git_ref),
            None => locator.to_string(),
        };

        match config.parser.parse(&locator) {
            Ok(spec) => {
                report.parsed += 1;
                write_status(out, Color::Green, "✓")?;
                let abs_path = spec.abs_path(&config.base_dir);
                writeln!(out, " {} {}", spec.clone_spec(), abs_path.display())?;
            }
            Err(e) => {
                report.failed += 1;
                tracing::warn!(locator = %locator, "skipping unparsable locator");
                write_status(out, Color::Red, "✗")?;
                writeln!(out, " {e}")?;
            }
        }
    }

    Ok(report)
}

/// Human-readable summary of a parsed locator.
pub fn render(spec: &RepoSpec, base_dir: &str) -> String {
    format!(
        "host:       {}\n\
         org/repo:   {}\n\
         path:       {}\n\
         ref:        {}\n\
         submodules: {}\n\
         timeout:    {}s\n\
         clone spec: {}\n\
         abs path:   {}\n",
        spec.host(),
        spec.org_repo(),
        spec.path(),
        spec.git_ref(),
        spec.submodules(),
        spec.timeout().as_secs_f64(),
        spec.clone_spec(),
        spec.abs_path(base_dir).display(),
    )
}

// A ref already present in the locator's query wins, since the first value is used.
fn with_ref(locator: &str, git_ref: &str) -> String {
    let separator = if locator.contains('?') { '&' } else { '?' };
    format!("{locator}{separator}ref={git_ref}")
}

fn write_status(out: &mut impl WriteColor, color: Color, mark: &str) -> Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{mark}")?;
    out.reset()?;
    Ok(())
}
