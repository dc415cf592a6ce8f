// ============================================================
// Layer 2 — BuildUseCase
// ============================================================
// Orchestrates one full corpus build in order:
//
//   Step 1: Check the archive layout       (Layer 4 - data)
//   Step 2: Load the blacklist             (Layer 4 - data)
//   Step 3: Correlate lines ↔ stroke files (Layer 4 - data)
//   Step 4: Assemble the fixed arrays      (Layer 4 - data)
//   Step 5: Drop outlier rows              (Layer 4 - data)
//   Step 6: Persist corpus + config        (Layer 6 - infra)
//   Step 7: Write the build report         (Layer 6 - infra)
//
// Any fatal data error (count mismatch, malformed transcription,
// unreadable stroke file) stops the build before anything is
// written, so a previous corpus is never half-overwritten.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::data::{
    archive::ArchiveLayout,
    assembler::{Assembler, DEFAULT_MAX_OFFSET_NORM},
    blacklist::Blacklist,
    correlator::Correlator,
    transcription::TranscriptionExtractor,
};
use crate::drawing::{AsciiAlphabet, DrawingPipeline, MAX_CHAR_LEN};
use crate::infra::{build_report::BuildReport, corpus_store::CorpusStore};

// ─── Build Configuration ──────────────────────────────────────────────────────
// Everything that decides what a build reads and writes.
// Saved next to the corpus so a build can be traced and repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub archive_root:          String,
    pub transcription_segment: String,
    pub stroke_segment:        String,
    pub metadata_segment:      String,
    pub blacklist:             Option<String>,
    pub output_dir:            String,
    /// Transcription files (relative to the transcription archive)
    /// that are always skipped
    pub known_bad:             Vec<String>,
    pub max_offset_norm:       f32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            archive_root:          "data/raw".to_string(),
            transcription_segment: "ascii".to_string(),
            stroke_segment:        "lineStrokes".to_string(),
            metadata_segment:      "original".to_string(),
            blacklist:             None,
            output_dir:            "data/processed".to_string(),
            // Transcription with no usable stroke counterpart in IAM-OnDB
            known_bad:             vec!["z01/z01-000/z01-000z.txt".to_string()],
            max_offset_norm:       DEFAULT_MAX_OFFSET_NORM,
        }
    }
}

impl BuildConfig {
    /// Load a config from JSON. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read build config '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid build config '{}'", path.display()))
    }

    pub fn layout(&self) -> ArchiveLayout {
        ArchiveLayout::new(
            &self.archive_root,
            &self.transcription_segment,
            &self.stroke_segment,
            &self.metadata_segment,
        )
    }

    fn known_bad_paths(&self) -> Vec<PathBuf> {
        self.known_bad.iter().map(PathBuf::from).collect()
    }
}

// ─── BuildUseCase ─────────────────────────────────────────────────────────────
pub struct BuildUseCase {
    config: BuildConfig,
}

impl BuildUseCase {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Run the build end to end and return its report.
    pub fn execute(&self) -> Result<BuildReport> {
        let cfg = &self.config;

        // ── Step 1: Archive layout ────────────────────────────────────────────
        let layout = cfg.layout();
        let transcription_root = layout.transcription_root();
        if !transcription_root.is_dir() {
            bail!(
                "Transcription archive '{}' does not exist",
                transcription_root.display()
            );
        }
        tracing::info!("Traversing '{}'", transcription_root.display());

        // ── Step 2: Blacklist ─────────────────────────────────────────────────
        let blacklist = match &cfg.blacklist {
            Some(path) => Blacklist::load(Path::new(path))?,
            None       => Blacklist::empty(),
        };

        // ── Step 3: Correlate ─────────────────────────────────────────────────
        let known_bad   = cfg.known_bad_paths();
        let extractor   = TranscriptionExtractor::new(AsciiAlphabet, MAX_CHAR_LEN);
        let correlation = Correlator::new(&layout, &blacklist, &known_bad, extractor)
            .correlate()
            .context("Correlating transcriptions with stroke files failed")?;

        // ── Step 4: Assemble ──────────────────────────────────────────────────
        tracing::info!("Dumping {} samples to arrays", correlation.samples.len());
        let assembly = Assembler::new(DrawingPipeline, cfg.max_offset_norm)
            .assemble(&correlation.samples)
            .context("Assembling the corpus failed")?;

        // ── Step 5: Drop outliers ─────────────────────────────────────────────
        let report = BuildReport::new(&correlation, &assembly);
        let corpus = assembly.into_valid_corpus();

        // ── Step 6: Persist ───────────────────────────────────────────────────
        let store = CorpusStore::new(&cfg.output_dir);
        store.save(&corpus)?;
        store.save_config(cfg)?;

        // ── Step 7: Report ────────────────────────────────────────────────────
        report.save(store.dir())?;
        tracing::info!(
            "Corpus built: {} persisted, {} outliers dropped, {} sessions skipped",
            report.samples_persisted,
            report.samples_invalid,
            report.skipped.len(),
        );

        Ok(report)
    }
}
