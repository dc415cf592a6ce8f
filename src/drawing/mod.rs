// ============================================================
// Layer 5 — Drawing Layer
// ============================================================
// Pure, stateless transforms shared by the correlator and the
// assembler:
//
//   alphabet.rs  — the fixed symbol vocabulary and the
//                  character → index encoder
//
//   transform.rs — the geometry pipeline applied to every
//                  raw pen trace:
//
//       RawStroke
//           │
//           ▼
//       align             → removes global slant and baseline offset
//           │
//           ▼
//       denoise           → Savitzky–Golay smoothing per stroke
//           │
//           ▼
//       coords_to_offsets → absolute points become deltas
//           │
//           ▼
//       truncate          → at most MAX_STROKE_LEN rows
//           │
//           ▼
//       normalize         → deltas scaled to median unit norm
//
// Nothing in here touches the filesystem.

/// Symbol vocabulary and ASCII encoder
pub mod alphabet;

/// Geometry transforms and the default pipeline
pub mod transform;

pub use alphabet::AsciiAlphabet;
pub use transform::DrawingPipeline;

/// Upper bound on offset rows stored per sample
pub const MAX_STROKE_LEN: usize = 1200;

/// Upper bound on symbols stored per sample
pub const MAX_CHAR_LEN: usize = 75;
