// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw archives all the
// way to fixed-shape arrays and tensor batches.
//
// The pipeline flows in this order:
//
//   ascii/ lineStrokes/ original/
//       │
//       ▼
//   archive         → maps a transcription file onto its
//                     stroke directory and metadata file
//       │
//       ▼
//   Correlator      → pairs transcription lines with stroke
//                     files (uses transcription + writer +
//                     blacklist)
//       │
//       ▼
//   Assembler       → reads every stroke file, runs the
//                     geometry pipeline, fills the Corpus
//       │
//       ▼
//   CorpusDataset   → implements Burn's Dataset trait
//       │
//       ▼
//   StrokeBatcher   → stacks rows into tensor batches
//
// Each module is responsible for exactly one step.

/// Archive layout, session naming convention, leaf enumeration
pub mod archive;

/// Extracts transcription lines from the text archive
pub mod transcription;

/// Resolves the writer id of a capture session
pub mod writer;

/// Reads pen traces from line-stroke XML
pub mod strokes;

/// Stroke files excluded from the corpus
pub mod blacklist;

/// Pairs transcription lines with stroke files
pub mod correlator;

/// Packs samples into the fixed-shape corpus
pub mod assembler;

/// Implements Burn's Dataset trait over a corpus
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

#[cfg(test)]
pub mod test_support;
