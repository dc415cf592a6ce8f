// ============================================================
// Layer 4 — Assembler
// ============================================================
// Turns the correlated sample list into the fixed-shape corpus.
//
// For every sample, in order:
//   1. read the pen trace from its stroke XML
//   2. run the geometry pipeline → normalised offsets
//   3. copy offsets into row i of `strokes`, record the length
//   4. copy symbols into row i of `chars`, record the length
//   5. record the writer id
//   6. flag the row invalid if any step is longer than the
//      outlier threshold; those are digitiser glitches
//
// Rows are written left-justified into zeroed buffers, so
// everything past a row's length stays zero.

use ndarray::{s, Array2};

use crate::data::strokes::read_raw_stroke;
use crate::domain::corpus::Corpus;
use crate::domain::error::CorpusResult;
use crate::domain::sample::Sample;
use crate::domain::traits::GeometryPipeline;
use crate::drawing::transform::step_norms;
use crate::drawing::{MAX_CHAR_LEN, MAX_STROKE_LEN};

/// Default outlier threshold on a single normalised step
pub const DEFAULT_MAX_OFFSET_NORM: f32 = 60.0;

/// How often to log assembly progress
const PROGRESS_EVERY: usize = 200;

/// The full corpus plus the per-row validity mask.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub corpus: Corpus,
    pub valid:  Vec<bool>,
}

impl Assembly {
    pub fn invalid_count(&self) -> usize {
        self.valid.iter().filter(|v| !**v).count()
    }

    pub fn valid_rows(&self) -> Vec<usize> {
        self.valid
            .iter()
            .enumerate()
            .filter_map(|(i, &ok)| ok.then_some(i))
            .collect()
    }

    /// Drop the invalid rows, keeping the order of the rest.
    pub fn into_valid_corpus(self) -> Corpus {
        self.corpus.select_rows(&self.valid_rows())
    }
}

pub struct Assembler<G: GeometryPipeline> {
    pipeline:        G,
    max_offset_norm: f32,
}

impl<G: GeometryPipeline> Assembler<G> {
    pub fn new(pipeline: G, max_offset_norm: f32) -> Self {
        Self { pipeline, max_offset_norm }
    }

    /// Build every row of the corpus. A stroke file that cannot be
    /// read or parsed aborts the whole assembly.
    pub fn assemble(&self, samples: &[Sample]) -> CorpusResult<Assembly> {
        let n = samples.len();
        let mut corpus = Corpus::zeros(n);
        let mut valid  = vec![false; n];

        for (i, sample) in samples.iter().enumerate() {
            if i % PROGRESS_EVERY == 0 {
                tracing::info!("Assembling {} / {}", i, n);
            }

            let raw     = read_raw_stroke(&sample.stroke_path)?;
            let offsets = self.pipeline.process(&raw, MAX_STROKE_LEN);

            valid[i] = !offsets.is_empty() && is_plausible(&offsets, self.max_offset_norm);
            if !valid[i] {
                tracing::debug!("Outlier: {}", sample.stroke_path.display());
            }

            write_row(&mut corpus, i, sample, &offsets);
        }

        let assembly = Assembly { corpus, valid };
        tracing::info!(
            "Assembled {} rows, {} flagged invalid",
            n,
            assembly.invalid_count()
        );
        Ok(assembly)
    }
}

/// True when no step's (dx, dy) length exceeds `threshold`. A
/// non-finite step never passes.
pub fn is_plausible(offsets: &Array2<f32>, threshold: f32) -> bool {
    step_norms(offsets)
        .iter()
        .all(|&norm| norm.is_finite() && norm <= threshold)
}

fn write_row(corpus: &mut Corpus, i: usize, sample: &Sample, offsets: &Array2<f32>) {
    let stroke_len = offsets.nrows().min(MAX_STROKE_LEN);
    corpus
        .strokes
        .slice_mut(s![i, ..stroke_len, ..])
        .assign(&offsets.slice(s![..stroke_len, ..]));
    corpus.stroke_lens[i] = stroke_len as i16;

    let char_len = sample.symbols.len().min(MAX_CHAR_LEN);
    for (j, &symbol) in sample.symbols[..char_len].iter().enumerate() {
        // alphabet indices are below 73
        corpus.chars[[i, j]] = symbol as i8;
    }
    corpus.char_lens[i] = char_len as i8;

    corpus.writer_ids[i] = sample.writer_id;
}
