// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All real work is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `build`   — turns the raw archives into training arrays
//   2. `inspect` — checks a built corpus and reports its shape
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{BuildArgs, Commands, InspectArgs};

/// The main CLI struct
#[derive(Parser, Debug)]
#[command(
    name = "handwriting-corpus",
    version = "0.1.0",
    about = "Build fixed-shape handwriting training arrays from the IAM On-Line archives."
)]
pub struct Cli {
    /// The subcommand to run (build or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Build(args)   => run_build(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_build(args: BuildArgs) -> Result<()> {
    use crate::application::build_use_case::BuildUseCase;

    let config = args.into_config()?;
    tracing::info!("Building corpus from '{}'", config.archive_root);

    let output_dir = config.output_dir.clone();
    let report     = BuildUseCase::new(config).execute()?;

    println!(
        "Built {} samples into '{}' ({} outliers dropped, {} blacklisted, {} sessions skipped).",
        report.samples_persisted,
        output_dir,
        report.samples_invalid,
        report.blacklisted.len(),
        report.skipped.len(),
    );
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    let summary = InspectUseCase::new(&args.corpus_dir, args.batch_size).execute()?;

    println!("\nCorpus: {}", args.corpus_dir);
    println!("  samples          {}", summary.samples);
    println!("  writers          {} ({} rows unknown)", summary.distinct_writers, summary.unknown_writers);
    println!("  stroke length    mean {:.1}, max {}", summary.mean_stroke_len, summary.max_stroke_len);
    println!("  text length      mean {:.1}", summary.mean_char_len);
    match (summary.batch_strokes, summary.batch_chars) {
        (Some(strokes), Some(chars)) => {
            println!("  batch strokes    {:?}", strokes);
            println!("  batch chars      {:?}", chars);
        }
        _ => println!("  batch            (empty corpus)"),
    }
    Ok(())
}
