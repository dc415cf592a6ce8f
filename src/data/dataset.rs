use burn::data::dataset::Dataset;
use ndarray::s;
use serde::{Deserialize, Serialize};

use crate::domain::corpus::Corpus;

/// One corpus row in the shape a training loop consumes.
/// Both sequences keep their zero padding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandwritingItem {
    /// Row-major [MAX_STROKE_LEN, 3] offsets
    pub strokes:    Vec<f32>,
    pub stroke_len: usize,
    /// [MAX_CHAR_LEN] symbol indices
    pub chars:      Vec<i32>,
    pub char_len:   usize,
    pub writer_id:  i32,
}

impl HandwritingItem {
    /// The real (unpadded) offset rows as (dx, dy, end) triples
    pub fn offsets(&self) -> impl Iterator<Item = &[f32]> {
        self.strokes.chunks(3).take(self.stroke_len)
    }
}

pub struct CorpusDataset {
    corpus: Corpus,
}

impl CorpusDataset {
    pub fn new(corpus: Corpus) -> Self { Self { corpus } }
}

impl Dataset<HandwritingItem> for CorpusDataset {
    fn get(&self, index: usize) -> Option<HandwritingItem> {
        if index >= self.corpus.len() {
            return None;
        }
        Some(HandwritingItem {
            strokes:    self.corpus.strokes.slice(s![index, .., ..]).iter().copied().collect(),
            stroke_len: self.corpus.stroke_lens[index] as usize,
            chars:      self.corpus.chars.row(index).iter().map(|&c| c as i32).collect(),
            char_len:   self.corpus.char_lens[index] as usize,
            writer_id:  self.corpus.writer_ids[index] as i32,
        })
    }

    fn len(&self) -> usize {
        self.corpus.len()
    }
}
