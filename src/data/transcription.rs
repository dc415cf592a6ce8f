// ============================================================
// Layer 4 — Transcription Extractor
// ============================================================
// Reads the ground-truth text lines out of one transcription
// file. A file holds one or more capture-session blocks joined
// by a row of percent signs. Each block looks like this:
//
//   OCR:
//
//   A MOVE to stop Mr. Gaitskell
//   ...
//   CSR:
//                             ← always skipped
//   A MOVE to stop Mr. Gaitskell
//   from nominating any more Labour
//
// The lines after `CSR:` (minus the one right after it) are the
// transcription, one per line-stroke file, in the same order as
// the lexically sorted stroke file names.

use std::fs;
use std::path::Path;

use crate::domain::error::{CorpusError, CorpusResult};
use crate::domain::traits::SymbolEncoder;

/// Separator between capture-session blocks
pub const BLOCK_DELIMITER: &str = "%%%%%%%%%%%";

/// Line that opens the corrected transcription of a block
pub const CSR_MARKER: &str = "CSR:";

/// One transcription line, as written and as encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionLine {
    pub text:    String,
    pub symbols: Vec<u8>,
}

pub struct TranscriptionExtractor<E: SymbolEncoder> {
    encoder:   E,
    max_chars: usize,
}

impl<E: SymbolEncoder> TranscriptionExtractor<E> {
    pub fn new(encoder: E, max_chars: usize) -> Self {
        Self { encoder, max_chars }
    }

    /// Read and extract one transcription file.
    pub fn extract_file(&self, path: &Path) -> CorpusResult<Vec<TranscriptionLine>> {
        let content = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
        self.extract(path, &content)
    }

    /// Extract the encoded lines from already-loaded file content.
    /// `path` is only used for error reporting.
    pub fn extract(&self, path: &Path, content: &str) -> CorpusResult<Vec<TranscriptionLine>> {
        let blocks: Vec<&str> = content
            .split(BLOCK_DELIMITER)
            .filter(|b| !b.trim().is_empty())
            .collect();

        if blocks.is_empty() {
            return Err(CorpusError::MissingMarker { path: path.to_path_buf() });
        }

        let mut lines = Vec::new();
        for block in blocks {
            for text in block_lines(block).ok_or_else(|| CorpusError::MissingMarker {
                path: path.to_path_buf(),
            })? {
                let mut symbols = self.encoder.encode(text);
                symbols.truncate(self.max_chars);
                lines.push(TranscriptionLine { text: text.to_string(), symbols });
            }
        }

        tracing::debug!("{}: {} transcription lines", path.display(), lines.len());
        Ok(lines)
    }
}

/// The non-blank, trimmed lines after the marker of one block, or
/// `None` if the block has no marker.
fn block_lines(block: &str) -> Option<Vec<&str>> {
    let rows: Vec<&str> = block.split('\n').map(str::trim).collect();
    let marker = rows.iter().position(|r| *r == CSR_MARKER)?;

    Some(
        rows.iter()
            .skip(marker + 2)
            .copied()
            .filter(|r| !r.is_empty())
            .collect(),
    )
}
