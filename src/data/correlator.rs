// ============================================================
// Layer 4 — Correlator
// ============================================================
// Walks the transcription archive and pairs every transcription
// line with the stroke file it was written in.
//
// For each leaf transcription file, e.g.
//   ascii/a01/a01-000/a01-000u.txt
//
//   1. stroke directory  → lineStrokes/a01/a01-000/
//   2. stroke prefix     → "a01-000u-"
//   3. stroke files      → a01-000u-01.xml, a01-000u-02.xml, ...
//                          (sorted lexically)
//   4. metadata file     → original/a01/a01-000/strokesu.xml
//   5. transcription     → lines after "CSR:"
//   6. pair positionally → i-th stroke file ↔ i-th line
//
// The two archives must agree on the number of lines. When they
// do not, the whole run stops: that means corruption, and
// guessing a pairing would silently mislabel data.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::archive::{files_with_prefix, leaf_files, ArchiveLayout, SessionKey};
use crate::data::blacklist::Blacklist;
use crate::data::transcription::TranscriptionExtractor;
use crate::data::writer::resolve_writer_id;
use crate::domain::error::{CorpusError, CorpusResult};
use crate::domain::sample::Sample;
use crate::domain::traits::SymbolEncoder;

/// Why a whole transcription file produced no samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Listed as a known archive defect
    KnownBad,
    /// The mirrored stroke directory does not exist
    MissingStrokeDir,
    /// The stroke directory has no file with the session prefix
    NoMatchingStrokes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSession {
    pub transcription: PathBuf,
    pub reason:        SkipReason,
}

/// Everything the correlator produced in one pass.
#[derive(Debug, Clone, Default)]
pub struct Correlation {
    /// Samples in archive order
    pub samples: Vec<Sample>,

    /// Transcription files that were skipped, with the reason
    pub skipped: Vec<SkippedSession>,

    /// Stroke files dropped because they are blacklisted
    pub blacklisted: Vec<PathBuf>,

    /// Number of leaf transcription files visited
    pub transcription_files: usize,
}

pub struct Correlator<'a, E: SymbolEncoder> {
    layout:    &'a ArchiveLayout,
    blacklist: &'a Blacklist,
    known_bad: &'a [PathBuf],
    extractor: TranscriptionExtractor<E>,
}

impl<'a, E: SymbolEncoder> Correlator<'a, E> {
    /// `known_bad` paths are relative to the transcription archive.
    pub fn new(
        layout:    &'a ArchiveLayout,
        blacklist: &'a Blacklist,
        known_bad: &'a [PathBuf],
        extractor: TranscriptionExtractor<E>,
    ) -> Self {
        Self { layout, blacklist, known_bad, extractor }
    }

    /// Correlate every transcription file in the archive.
    pub fn correlate(&self) -> CorpusResult<Correlation> {
        let files = leaf_files(&self.layout.transcription_root())?;
        tracing::info!("Found {} transcription files", files.len());

        let mut out = Correlation::default();
        for (i, file) in files.iter().enumerate() {
            tracing::debug!("[{}] {}", i, file.display());
            self.correlate_file(file, &mut out)?;
        }

        tracing::info!(
            "Correlated {} samples ({} sessions skipped, {} blacklisted)",
            out.samples.len(),
            out.skipped.len(),
            out.blacklisted.len(),
        );
        Ok(out)
    }

    /// Correlate one transcription file, appending to `out`.
    pub fn correlate_file(&self, file: &Path, out: &mut Correlation) -> CorpusResult<()> {
        out.transcription_files += 1;

        let rel = self.layout.relative_transcription(file)?;
        if self.known_bad.iter().any(|bad| *bad == rel) {
            tracing::info!("Skipping known-bad transcription {}", rel.display());
            skip(out, file, SkipReason::KnownBad);
            return Ok(());
        }

        let key = SessionKey::from_transcription(file).ok_or_else(|| CorpusError::OutsideArchive {
            path: file.to_path_buf(),
            root: self.layout.transcription_root(),
        })?;

        let stroke_dir = self.layout.stroke_dir_for(file)?;
        if !stroke_dir.is_dir() {
            tracing::warn!("Unknown stroke directory {}", stroke_dir.display());
            skip(out, file, SkipReason::MissingStrokeDir);
            return Ok(());
        }

        let prefix       = key.stroke_prefix();
        let stroke_names = files_with_prefix(&stroke_dir, &prefix)?;
        if stroke_names.is_empty() {
            tracing::warn!("No '{}*' stroke files in {}", prefix, stroke_dir.display());
            skip(out, file, SkipReason::NoMatchingStrokes);
            return Ok(());
        }

        let writer_id = resolve_writer_id(&self.layout.metadata_xml_for(file, &key)?);
        let lines     = self.extractor.extract_file(file)?;

        if lines.len() != stroke_names.len() {
            return Err(CorpusError::CountMismatch {
                path:    file.to_path_buf(),
                strokes: stroke_names.len(),
                lines:   lines.len(),
            });
        }

        for (line, name) in lines.into_iter().zip(stroke_names) {
            let stroke_path = stroke_dir.join(&name);
            if self.blacklist.contains(&name) {
                tracing::debug!("Blacklisted {}", name);
                out.blacklisted.push(stroke_path);
                continue;
            }
            out.samples.push(Sample::new(stroke_path, line.text, line.symbols, writer_id));
        }
        Ok(())
    }
}

fn skip(out: &mut Correlation, file: &Path, reason: SkipReason) {
    out.skipped.push(SkippedSession { transcription: file.to_path_buf(), reason });
}
