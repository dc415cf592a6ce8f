// ============================================================
// Layer 4 — Handwriting Batcher
// ============================================================
// Implements Burn's Batcher trait to stack corpus rows into
// tensors for a downstream handwriting model.
//
//   Input:  Vec of N HandwritingItems
//   Output: HandwritingBatch with
//             strokes     [N, MAX_STROKE_LEN, 3]  float
//             stroke_lens [N]                     int
//             chars       [N, MAX_CHAR_LEN]       int
//             char_lens   [N]                     int
//             writer_ids  [N]                     int
//
// Every row is already padded to the fixed width, so batching
// is a flatten-then-reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::HandwritingItem;
use crate::drawing::{MAX_CHAR_LEN, MAX_STROKE_LEN};

// ─── HandwritingBatch ─────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct HandwritingBatch<B: Backend> {
    pub strokes:     Tensor<B, 3>,
    pub stroke_lens: Tensor<B, 1, Int>,
    pub chars:       Tensor<B, 2, Int>,
    pub char_lens:   Tensor<B, 1, Int>,
    pub writer_ids:  Tensor<B, 1, Int>,
}

// ─── StrokeBatcher ────────────────────────────────────────────────────────────
/// Holds the device the batch tensors are created on.
#[derive(Clone, Debug)]
pub struct StrokeBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> StrokeBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<HandwritingItem, HandwritingBatch<B>> for StrokeBatcher<B> {
    fn batch(&self, items: Vec<HandwritingItem>) -> HandwritingBatch<B> {
        let batch_size = items.len();

        // ── Flatten fixed-width rows ──────────────────────────────────────────
        let strokes_flat: Vec<f32> = items
            .iter()
            .flat_map(|item| item.strokes.iter().copied())
            .collect();

        let chars_flat: Vec<i32> = items
            .iter()
            .flat_map(|item| item.chars.iter().copied())
            .collect();

        // ── Per-sample scalars ────────────────────────────────────────────────
        let stroke_lens: Vec<i32> = items.iter().map(|i| i.stroke_len as i32).collect();
        let char_lens:   Vec<i32> = items.iter().map(|i| i.char_len as i32).collect();
        let writer_ids:  Vec<i32> = items.iter().map(|i| i.writer_id).collect();

        // ── Create tensors ────────────────────────────────────────────────────
        let strokes = Tensor::<B, 1>::from_floats(strokes_flat.as_slice(), &self.device)
            .reshape([batch_size, MAX_STROKE_LEN, 3]);

        let chars = Tensor::<B, 1, Int>::from_ints(chars_flat.as_slice(), &self.device)
            .reshape([batch_size, MAX_CHAR_LEN]);

        HandwritingBatch {
            strokes,
            stroke_lens: Tensor::<B, 1, Int>::from_ints(stroke_lens.as_slice(), &self.device),
            chars,
            char_lens:   Tensor::<B, 1, Int>::from_ints(char_lens.as_slice(), &self.device),
            writer_ids:  Tensor::<B, 1, Int>::from_ints(writer_ids.as_slice(), &self.device),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::data::dataset::Dataset;

    use crate::data::dataset::CorpusDataset;
    use crate::domain::corpus::Corpus;

    type TestBackend = NdArray;

    #[test]
    fn test_batch_shapes() {
        let mut corpus = Corpus::zeros(3);
        corpus.stroke_lens[2]     = 1;
        corpus.strokes[[2, 0, 0]] = 0.25;
        corpus.writer_ids[2]      = 5;

        let dataset = CorpusDataset::new(corpus);
        let items: Vec<HandwritingItem> = (0..dataset.len()).filter_map(|i| dataset.get(i)).collect();

        let batcher = StrokeBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(items);

        assert_eq!(batch.strokes.dims(), [3, MAX_STROKE_LEN, 3]);
        assert_eq!(batch.chars.dims(), [3, MAX_CHAR_LEN]);
        assert_eq!(batch.stroke_lens.dims(), [3]);
        assert_eq!(batch.writer_ids.dims(), [3]);

        let flat: Vec<f32> = batch.strokes.into_data().to_vec::<f32>().unwrap();
        assert_eq!(flat[2 * MAX_STROKE_LEN * 3], 0.25);
    }
}
