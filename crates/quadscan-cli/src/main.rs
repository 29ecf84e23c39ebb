// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadscan — find the dominant quadrilateral in a photo and rectify it.
//
// Entry point. Parses arguments, initialises logging, runs one detection, and
// reports the outcome.

mod io;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use quadscan_core::human_errors::humanize_error;

use run::{RunOptions, run};

#[derive(Parser)]
#[command(name = "quadscan")]
#[command(about = "Detect a document or screen in a photo and produce a bird's-eye view")]
#[command(version)]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory for `<stem>_outline.png` and `<stem>_warped.png` (defaults to the input's directory)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Detector settings as JSON; missing fields keep their defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail instead of copying the input when no quadrilateral is found
    #[arg(long)]
    strict: bool,

    /// Print a JSON detection report to stdout
    #[arg(long)]
    report: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let fallback = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(input = %cli.input.display(), "Quadscan starting");

    let options = RunOptions {
        input: cli.input,
        out_dir: cli.out_dir,
        config: cli.config,
        strict: cli.strict,
    };

    let summary = match run(&options) {
        Ok(summary) => summary,
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            let human = humanize_error(&err);
            eprintln!("{}\n  {}", human.message, human.suggestion);
            return ExitCode::FAILURE;
        }
    };

    if cli.report {
        match serde_json::to_string_pretty(&summary.report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                tracing::error!(error = %err, "report serialization failed");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
