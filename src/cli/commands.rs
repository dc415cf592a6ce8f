// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `build` and `inspect`, and
// all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for bad args
//   - type conversion (string → usize, f32, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::application::build_use_case::BuildConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the training arrays from the raw IAM-OnDB archives
    Build(BuildArgs),

    /// Check a built corpus and stack one batch from it
    Inspect(InspectArgs),
}

/// All arguments for the `build` command.
/// Flags given on the command line override `--config`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// JSON build config to start from
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the ascii/, lineStrokes/ and original/ archives
    #[arg(long)]
    pub archive_root: Option<String>,

    /// Where the .npy arrays, build config and report are written
    #[arg(long)]
    pub output_dir: Option<String>,

    /// File of stroke-file names to leave out (.json array or one per line)
    #[arg(long)]
    pub blacklist: Option<String>,

    /// Largest normalised step a kept sample may contain
    #[arg(long)]
    pub max_offset_norm: Option<f32>,
}

impl BuildArgs {
    /// Resolve the final config: defaults, then `--config`, then flags.
    pub fn into_config(self) -> Result<BuildConfig> {
        let base = match &self.config {
            Some(path) => BuildConfig::load(path)?,
            None       => BuildConfig::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(self, mut cfg: BuildConfig) -> BuildConfig {
        if let Some(root) = self.archive_root {
            cfg.archive_root = root;
        }
        if let Some(out) = self.output_dir {
            cfg.output_dir = out;
        }
        if self.blacklist.is_some() {
            cfg.blacklist = self.blacklist;
        }
        if let Some(norm) = self.max_offset_norm {
            cfg.max_offset_norm = norm;
        }
        cfg
    }
}

/// Convert CLI BuildArgs into the application-layer BuildConfig,
/// ignoring `--config`. The application layer never sees clap types.
impl From<BuildArgs> for BuildConfig {
    fn from(a: BuildArgs) -> Self {
        a.apply(BuildConfig::default())
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Directory a corpus was built into
    #[arg(long, default_value = "data/processed")]
    pub corpus_dir: String,

    /// Number of samples stacked into the test batch
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,
}
