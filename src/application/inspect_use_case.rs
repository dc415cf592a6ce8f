// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Loads a persisted corpus and checks it is fit to train on:
//
//   Step 1: Load the five arrays          (Layer 6 - infra)
//   Step 2: Check the shape invariants    (Layer 3 - domain)
//   Step 3: Re-check every row's steps    (Layer 4 - data)
//   Step 4: Stack one batch of tensors    (Layer 4 - data)
//
// Step 4 proves the arrays feed straight into a Burn training
// loop without any further conversion.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use burn::backend::NdArray;
use burn::data::dataloader::batcher::Batcher;
use burn::data::dataset::Dataset;
use ndarray::Array2;

use crate::application::build_use_case::BuildConfig;
use crate::data::assembler::is_plausible;
use crate::data::batcher::StrokeBatcher;
use crate::data::dataset::{CorpusDataset, HandwritingItem};
use crate::infra::corpus_store::CorpusStore;

type InspectBackend = NdArray;

/// What `inspect` found in a corpus directory.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectSummary {
    pub samples:          usize,
    pub distinct_writers: usize,
    /// Rows whose writer could not be resolved
    pub unknown_writers:  usize,
    pub mean_stroke_len:  f64,
    pub max_stroke_len:   usize,
    pub mean_char_len:    f64,
    /// Dims of the sample batch: strokes, then chars
    pub batch_strokes:    Option<[usize; 3]>,
    pub batch_chars:      Option<[usize; 2]>,
}

pub struct InspectUseCase {
    corpus_dir: PathBuf,
    batch_size: usize,
}

impl InspectUseCase {
    pub fn new(corpus_dir: impl Into<PathBuf>, batch_size: usize) -> Self {
        Self { corpus_dir: corpus_dir.into(), batch_size }
    }

    pub fn execute(&self) -> Result<InspectSummary> {
        // ── Step 1: Load ──────────────────────────────────────────────────────
        let store  = CorpusStore::new(&self.corpus_dir);
        let corpus = store.load()?;
        tracing::info!("Loaded {} samples from '{}'", corpus.len(), self.corpus_dir.display());

        // The threshold the corpus was built with, if it was recorded
        let threshold = match store.load_config() {
            Ok(cfg) => cfg.max_offset_norm,
            Err(e) => {
                tracing::warn!("No build config next to the corpus ({e:#}), using defaults");
                BuildConfig::default().max_offset_norm
            }
        };

        // ── Step 2: Shape invariants ──────────────────────────────────────────
        corpus
            .check_invariants()
            .map_err(|msg| anyhow!("Corpus in '{}' is inconsistent: {msg}", self.corpus_dir.display()))?;

        // ── Step 3: Per-row checks ────────────────────────────────────────────
        let dataset = CorpusDataset::new(corpus);
        let mut writers         = BTreeSet::new();
        let mut unknown_writers = 0;
        let mut stroke_total    = 0usize;
        let mut char_total      = 0usize;
        let mut max_stroke_len  = 0usize;

        for (i, item) in dataset.iter().enumerate() {
            if !is_plausible(&offsets_of(&item)?, threshold) {
                bail!("Row {i} has a step longer than {threshold}");
            }
            if item.writer_id == 0 {
                unknown_writers += 1;
            }
            writers.insert(item.writer_id);
            stroke_total  += item.stroke_len;
            char_total    += item.char_len;
            max_stroke_len = max_stroke_len.max(item.stroke_len);
        }

        // ── Step 4: One batch ─────────────────────────────────────────────────
        let n = dataset.len();
        let (batch_strokes, batch_chars) = if n == 0 || self.batch_size == 0 {
            (None, None)
        } else {
            let items: Vec<HandwritingItem> = (0..self.batch_size.min(n))
                .filter_map(|i| dataset.get(i))
                .collect();
            let batch = StrokeBatcher::<InspectBackend>::new(Default::default()).batch(items);
            (Some(batch.strokes.dims()), Some(batch.chars.dims()))
        };

        let mean = |total: usize| if n == 0 { 0.0 } else { total as f64 / n as f64 };

        Ok(InspectSummary {
            samples:          n,
            distinct_writers: writers.len(),
            unknown_writers,
            mean_stroke_len:  mean(stroke_total),
            max_stroke_len,
            mean_char_len:    mean(char_total),
            batch_strokes,
            batch_chars,
        })
    }
}

/// The real offset rows of one item as an (n, 3) array.
fn offsets_of(item: &HandwritingItem) -> Result<Array2<f32>> {
    let flat: Vec<f32> = item.offsets().flatten().copied().collect();
    Ok(Array2::from_shape_vec((item.stroke_len, 3), flat)?)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::corpus::Corpus;
    use crate::drawing::{MAX_CHAR_LEN, MAX_STROKE_LEN};
    use tempfile::TempDir;

    fn small_corpus() -> Corpus {
        let mut corpus = Corpus::zeros(3);
        for i in 0..3 {
            corpus.stroke_lens[i]     = 2;
            corpus.strokes[[i, 0, 2]] = 1.0;
            corpus.strokes[[i, 1, 0]] = 1.5;
            corpus.chars[[i, 0]]      = 47;
            corpus.char_lens[i]       = 1;
        }
        corpus.writer_ids[0] = 10059;
        corpus.writer_ids[1] = 10059;
        corpus
    }

    #[test]
    fn test_inspect_reports_shapes() {
        let tmp = TempDir::new().unwrap();
        CorpusStore::new(tmp.path()).save(&small_corpus()).unwrap();

        let summary = InspectUseCase::new(tmp.path(), 2).execute().unwrap();

        assert_eq!(summary.samples, 3);
        assert_eq!(summary.distinct_writers, 2);
        assert_eq!(summary.unknown_writers, 1);
        assert_eq!(summary.mean_stroke_len, 2.0);
        assert_eq!(summary.max_stroke_len, 2);
        assert_eq!(summary.batch_strokes, Some([2, MAX_STROKE_LEN, 3]));
        assert_eq!(summary.batch_chars, Some([2, MAX_CHAR_LEN]));
    }

    #[test]
    fn test_inspect_rejects_outliers() {
        let tmp = TempDir::new().unwrap();
        let mut corpus = small_corpus();
        corpus.strokes[[1, 1, 1]] = 500.0;
        CorpusStore::new(tmp.path()).save(&corpus).unwrap();

        assert!(InspectUseCase::new(tmp.path(), 2).execute().is_err());
    }

    #[test]
    fn test_inspect_rejects_dirty_padding() {
        let tmp = TempDir::new().unwrap();
        let mut corpus = small_corpus();
        corpus.strokes[[0, 10, 0]] = 0.5;
        CorpusStore::new(tmp.path()).save(&corpus).unwrap();

        assert!(InspectUseCase::new(tmp.path(), 2).execute().is_err());
    }

    #[test]
    fn test_inspect_empty_corpus() {
        let tmp = TempDir::new().unwrap();
        CorpusStore::new(tmp.path()).save(&Corpus::zeros(0)).unwrap();

        let summary = InspectUseCase::new(tmp.path(), 8).execute().unwrap();
        assert_eq!(summary.samples, 0);
        assert_eq!(summary.batch_strokes, None);
    }

    #[test]
    fn test_inspect_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(InspectUseCase::new(tmp.path().join("nothing"), 2).execute().is_err());
    }
}
