//! depfix - Dependency manifest updater CLI tool
//!
//! Resolves every requirement in a manifest to the latest version allowed by
//! its constraint and the target Python, then rewrites or reports.

use clap::Parser;
use colored::Colorize;
use depfix::cli::CliArgs;
use depfix::orchestrator::Orchestrator;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(args: &CliArgs) {
    let level_filter = if args.quiet {
        LevelFilter::ERROR
    } else if args.verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("DEPFIX_LOG")
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .try_init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("depfix v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Manifest: {}", args.display_path());
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let color = io::stdout().is_terminal();
    let orchestrator = Orchestrator::new(args).with_color(color);

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let outcome = orchestrator.run(&mut stdin, &mut stdout).await?;
    stdout.flush()?;

    Ok(ExitCode::from(outcome.exit_code()))
}
