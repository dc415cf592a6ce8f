// ============================================================
// Layer 6 — Build Report
// ============================================================
// Bookkeeping for one corpus build, written next to the arrays
// as build_report.json:
//
//   {
//     "transcription_files": 1714,
//     "skipped": [{ "transcription": "...", "reason": "missing_stroke_dir" }],
//     "blacklisted": ["..."],
//     "samples_correlated": 12195,
//     "samples_invalid": 3,
//     "samples_persisted": 12192
//   }
//
// How to read it:
//   - many missing_stroke_dir skips → wrong segment names
//   - samples_invalid much above a handful → check the geometry
//     pipeline before training on the corpus

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::data::assembler::Assembly;
use crate::data::correlator::{Correlation, SkippedSession};

pub const REPORT_FILE: &str = "build_report.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Leaf transcription files visited
    pub transcription_files: usize,

    /// Transcription files that produced no samples, with the reason
    pub skipped: Vec<SkippedSession>,

    /// Stroke files dropped by the blacklist
    pub blacklisted: Vec<PathBuf>,

    /// Samples handed to the assembler
    pub samples_correlated: usize,

    /// Rows dropped by the outlier check
    pub samples_invalid: usize,

    /// Rows written to disk
    pub samples_persisted: usize,
}

impl BuildReport {
    pub fn new(correlation: &Correlation, assembly: &Assembly) -> Self {
        let samples_invalid = assembly.invalid_count();
        Self {
            transcription_files: correlation.transcription_files,
            skipped:             correlation.skipped.clone(),
            blacklisted:         correlation.blacklisted.clone(),
            samples_correlated:  correlation.samples.len(),
            samples_invalid,
            samples_persisted:   assembly.valid.len() - samples_invalid,
        }
    }

    /// Write the report as pretty JSON into `dir`.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(REPORT_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write build report to '{}'", path.display()))?;
        tracing::debug!("Wrote build report '{}'", path.display());
        Ok(path)
    }

    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(REPORT_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read build report '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}
