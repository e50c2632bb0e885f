//! CLI argument parsing module for depfix

use crate::config::{ResolverConfig, DEFAULT_INDEX_URL, DEFAULT_MAX_CONCURRENCY};
use crate::domain::Ecosystem;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parse a forced ecosystem name
fn parse_engine(s: &str) -> Result<Ecosystem, String> {
    s.parse()
}

/// Parse a concurrency limit, rejecting zero
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if value == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(value)
}

/// Update dependency manifests to the latest compatible versions
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depfix",
    version,
    about = "Update dependency manifests to the latest compatible versions"
)]
pub struct CliArgs {
    /// Manifest file to update (requirements.txt, package.json); `-` reads stdin
    pub file: String,

    /// Write the result to this file (`-` for stdout)
    #[arg(short = 'o', long = "out")]
    pub out: Option<String>,

    /// Update the manifest file in place
    #[arg(short = 'i', long)]
    pub in_place: bool,

    /// Show changes without applying them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Target Python version used to filter releases (e.g. 3.11)
    #[arg(long = "python", value_name = "VERSION")]
    pub python: Option<String>,

    /// Force the ecosystem instead of detecting it (python, node)
    #[arg(long, value_parser = parse_engine)]
    pub engine: Option<Ecosystem>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Diff)]
    pub format: OutputFormat,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Maximum simultaneous registry requests
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CONCURRENCY, value_parser = parse_concurrency)]
    pub max_concurrency: usize,

    /// Base URL of the PyPI-compatible index
    #[arg(long, env = "DEPFIX_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,

    /// Update exact pins too
    #[arg(long)]
    pub include_pinned: bool,

    /// Never choose pre-release or dev versions
    #[arg(long)]
    pub stable_only: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Returns true if the manifest is read from stdin
    pub fn reads_stdin(&self) -> bool {
        self.file == "-"
    }

    /// Path of the input manifest, unless it is stdin
    pub fn input_path(&self) -> Option<PathBuf> {
        (!self.reads_stdin()).then(|| PathBuf::from(&self.file))
    }

    /// Name shown in diff headers
    pub fn display_path(&self) -> &str {
        if self.reads_stdin() {
            "<stdin>"
        } else {
            &self.file
        }
    }

    /// Build the resolver configuration from the arguments
    pub fn resolver_config(&self) -> ResolverConfig {
        let mut config = ResolverConfig::new()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_max_concurrency(self.max_concurrency)
            .with_index_url(&self.index_url)
            .with_include_pinned(self.include_pinned)
            .with_include_prereleases(!self.stable_only);
        if let Some(ref python) = self.python {
            config = config.with_python_version(python);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["depfix", "requirements.txt"]);
        assert_eq!(args.file, "requirements.txt");
        assert!(args.out.is_none());
        assert!(!args.in_place);
        assert!(!args.dry_run);
        assert!(args.python.is_none());
        assert!(args.engine.is_none());
        assert_eq!(args.format, OutputFormat::Diff);
        assert_eq!(args.timeout, 30);
        assert_eq!(args.max_concurrency, 6);
        assert!(!args.include_pinned);
        assert!(!args.stable_only);
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_file_argument_is_required() {
        assert!(CliArgs::try_parse_from(["depfix"]).is_err());
    }

    #[test]
    fn test_short_flags() {
        let args = CliArgs::parse_from(["depfix", "reqs.txt", "-i", "-n", "-q", "-o", "out.txt"]);
        assert!(args.in_place);
        assert!(args.dry_run);
        assert!(args.quiet);
        assert_eq!(args.out.as_deref(), Some("out.txt"));
    }

    #[test]
    fn test_long_flags() {
        let args = CliArgs::parse_from([
            "depfix",
            "reqs.txt",
            "--in-place",
            "--dry-run",
            "--out",
            "-",
            "--python",
            "3.11",
            "--include-pinned",
            "--stable-only",
            "--verbose",
        ]);
        assert!(args.in_place);
        assert!(args.dry_run);
        assert_eq!(args.out.as_deref(), Some("-"));
        assert_eq!(args.python.as_deref(), Some("3.11"));
        assert!(args.include_pinned);
        assert!(args.stable_only);
        assert!(args.verbose);
    }

    #[test]
    fn test_format_values() {
        let args = CliArgs::parse_from(["depfix", "r.txt", "--format", "json"]);
        assert_eq!(args.format, OutputFormat::Json);
        let args = CliArgs::parse_from(["depfix", "r.txt", "--format", "text"]);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(CliArgs::try_parse_from(["depfix", "r.txt", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_engine_values() {
        let args = CliArgs::parse_from(["depfix", "r.txt", "--engine", "python"]);
        assert_eq!(args.engine, Some(Ecosystem::Python));
        let args = CliArgs::parse_from(["depfix", "r.txt", "--engine", "node"]);
        assert_eq!(args.engine, Some(Ecosystem::Node));
        assert!(CliArgs::try_parse_from(["depfix", "r.txt", "--engine", "cobol"]).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        assert!(CliArgs::try_parse_from(["depfix", "r.txt", "--max-concurrency", "0"]).is_err());
        let args = CliArgs::parse_from(["depfix", "r.txt", "--max-concurrency", "2"]);
        assert_eq!(args.max_concurrency, 2);
    }

    #[test]
    fn test_stdin_input() {
        let args = CliArgs::parse_from(["depfix", "-"]);
        assert!(args.reads_stdin());
        assert!(args.input_path().is_none());
        assert_eq!(args.display_path(), "<stdin>");

        let args = CliArgs::parse_from(["depfix", "requirements.txt"]);
        assert_eq!(args.input_path(), Some(PathBuf::from("requirements.txt")));
        assert_eq!(args.display_path(), "requirements.txt");
    }

    #[test]
    fn test_resolver_config() {
        let args = CliArgs::parse_from([
            "depfix",
            "r.txt",
            "--python",
            "3.12",
            "--timeout",
            "5",
            "--max-concurrency",
            "3",
            "--index-url",
            "http://localhost:1234/",
            "--stable-only",
        ]);
        let config = args.resolver_config();

        assert_eq!(config.python_version.as_deref(), Some("3.12"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_concurrency, 3);
        assert_eq!(config.index_url, "http://localhost:1234");
        assert!(!config.include_pinned);
        assert!(!config.include_prereleases);
    }
}
