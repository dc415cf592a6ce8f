// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The correlator and assembler never call the drawing
// transforms or the alphabet directly. They go through these
// two traits so tests can swap in a pass-through pipeline and
// check packing and validity on hand-written numbers.
//
// Implementations:
//   - drawing::DrawingPipeline  → GeometryPipeline
//   - drawing::AsciiAlphabet    → SymbolEncoder

use ndarray::Array2;

use crate::domain::sample::RawStroke;

// ─── GeometryPipeline ─────────────────────────────────────────────────────────
/// Turns a raw pen trace into a normalised offset sequence.
///
/// The result is an (n, 3) matrix of (dx, dy, end_of_stroke) rows
/// with `n <= max_len`.
pub trait GeometryPipeline {
    fn process(&self, raw: &RawStroke, max_len: usize) -> Array2<f32>;
}

// ─── SymbolEncoder ────────────────────────────────────────────────────────────
/// Maps transcription text to symbol indices, one per character.
pub trait SymbolEncoder {
    fn encode(&self, text: &str) -> Vec<u8>;
}
