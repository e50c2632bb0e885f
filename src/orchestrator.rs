//! Application workflow for one manifest
//!
//! This module provides:
//! - Workflow coordination: read → detect → parse → resolve → format → write
//! - Output destination selection (in place, `--out`, stdout)
//! - Outcome reporting mapped to process exit codes

use crate::cli::CliArgs;
use crate::domain::Ecosystem;
use crate::error::{AppError, ConfigError, ManifestError};
use crate::manifest::{
    has_changes, identify, parse_manifest, read_manifest, update_manifest_content,
    write_manifest,
};
use crate::output::{create_formatter, render, JsonFormatter, OutputConfig, OutputFormat};
use crate::progress::Progress;
use crate::registry::MetadataSource;
use crate::resolver::PythonResolver;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The manifest declares no registry entries
    NoEntries,
    /// Every entry is already at its chosen version
    NoChanges,
    /// Updated output was produced
    Updated,
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::NoEntries | Outcome::Updated => 0,
            Outcome::NoChanges => 2,
        }
    }
}

/// Where the produced output goes
#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Stdout,
    InPlace(PathBuf),
    File(PathBuf),
}

/// Orchestrator for the update workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Metadata source override, used instead of the configured index
    source: Option<Arc<dyn MetadataSource>>,
    /// Whether text output may use colors
    color: bool,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            source: None,
            color: true,
        }
    }

    /// Resolve against a specific metadata source (builder pattern)
    pub fn with_source(mut self, source: Arc<dyn MetadataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Enable or disable colored text output (builder pattern)
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn resolver(&self) -> Result<PythonResolver, ConfigError> {
        let config = self.args.resolver_config();
        match &self.source {
            Some(source) => PythonResolver::new(config, Arc::clone(source)),
            None => PythonResolver::from_config(config),
        }
    }

    fn read_input(&self, stdin: &mut dyn Read) -> Result<String, ManifestError> {
        match self.args.input_path() {
            Some(path) => read_manifest(&path),
            None => {
                let mut content = String::new();
                stdin
                    .read_to_string(&mut content)
                    .map_err(|e| ManifestError::read_error("<stdin>", e))?;
                Ok(content)
            }
        }
    }

    fn detect(&self, content: &str) -> Ecosystem {
        if let Some(engine) = self.args.engine {
            return engine;
        }
        let filename = (!self.args.reads_stdin()).then_some(self.args.file.as_str());
        identify(content, filename)
    }

    fn destination(&self) -> Result<Destination, ConfigError> {
        let args = &self.args;
        if args.dry_run {
            return Ok(Destination::Stdout);
        }
        if args.in_place {
            if args.format == OutputFormat::Json {
                return Err(ConfigError::ConflictingOptions {
                    message: "a JSON report cannot be written in place; use --out".to_string(),
                });
            }
            if let Some(path) = args.input_path() {
                return Ok(Destination::InPlace(path));
            }
        }
        if let Some(ref out) = args.out {
            return Ok(if out == "-" {
                Destination::Stdout
            } else {
                Destination::File(PathBuf::from(out))
            });
        }
        if args.in_place {
            return Err(ConfigError::ConflictingOptions {
                message: "--in-place cannot be used when reading from stdin".to_string(),
            });
        }
        if args.reads_stdin() {
            return Ok(Destination::Stdout);
        }
        Err(ConfigError::MissingOutput)
    }

    /// Run the workflow, reading stdin and writing stdout through the given handles
    pub async fn run(
        &self,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> Result<Outcome, AppError> {
        let content = self.read_input(stdin)?;

        let ecosystem = self.detect(&content);
        debug!("Detected ecosystem: {}", ecosystem);
        if !ecosystem.is_supported() {
            return Err(ManifestError::UnsupportedEcosystem { ecosystem }.into());
        }

        let manifest = parse_manifest(&content, ecosystem)?;
        if manifest.is_empty() {
            writeln!(stdout, "No dependencies found to update")?;
            return Ok(Outcome::NoEntries);
        }

        let destination = self.destination()?;
        let resolver = self.resolver()?;

        let mut progress = Progress::new(!self.args.quiet);
        progress.spinner(&format!(
            "Resolving {} package(s) on {}...",
            manifest.entries.len(),
            ecosystem.registry_name()
        ));
        let results = resolver.resolve_all(&manifest.entries).await;
        progress.finish_and_clear();
        let results = results?;

        if !has_changes(&results) {
            if self.args.format == OutputFormat::Json {
                write!(stdout, "{}", render(&JsonFormatter::new(), &results)?)?;
            } else {
                writeln!(stdout, "No updates available")?;
            }
            return Ok(Outcome::NoChanges);
        }

        let output = if self.args.format == OutputFormat::Json || self.args.dry_run {
            let config = OutputConfig::new(self.args.format, self.args.display_path())
                .with_color(self.color);
            render(create_formatter(&config).as_ref(), &results)?
        } else {
            update_manifest_content(&content, &results)
        };

        match destination {
            Destination::Stdout => {
                write!(stdout, "{}", output)?;
                if !output.ends_with('\n') {
                    writeln!(stdout)?;
                }
            }
            Destination::InPlace(path) => {
                write_manifest(&path, &output)?;
                info!("Wrote {}", path.display());
                if !self.args.quiet {
                    writeln!(stdout, "Updated {}", path.display())?;
                }
            }
            Destination::File(path) => {
                write_manifest(&path, &output)?;
                info!("Wrote {}", path.display());
                if !self.args.quiet {
                    writeln!(stdout, "Wrote updated manifest to {}", path.display())?;
                }
            }
        }

        Ok(Outcome::Updated)
    }
}
