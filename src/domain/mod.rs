// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, traits and error types that describe
// what the corpus builder works with:
//
//   sample.rs — a correlated (stroke file, transcription, writer)
//               triple and the raw pen trace read from XML
//   corpus.rs — the five parallel fixed-shape output arrays
//   traits.rs — the seams to the geometry pipeline and the
//               symbol encoder
//   error.rs  — typed failures raised by the data layer
//
// Rules for this layer:
//   - NO file I/O
//   - NO XML parsing
//   - NO Burn framework types

/// Correlated samples and raw stroke points
pub mod sample;

/// Fixed-shape corpus arrays
pub mod corpus;

/// Geometry and symbol-encoding abstractions
pub mod traits;

/// Typed pipeline errors
pub mod error;
