// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// goal (building a corpus or inspecting one).
//
// Rules for this layer:
//   - No geometry or parsing code here
//   - No printing here (that's Layer 1)
//   - No direct array file access (that's Layer 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Archive → training arrays
pub mod build_use_case;

// Training arrays → sanity report
pub mod inspect_use_case;
