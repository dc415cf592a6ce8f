// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that writes build results to disk:
//
//   corpus_store.rs — the five corpus arrays as .npy files,
//                     plus the BuildConfig of the run as JSON
//                     so a corpus can be traced back to the
//                     archive and settings that produced it
//
//   build_report.rs — per-run bookkeeping: skipped sessions,
//                     blacklisted files, outliers dropped
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Corpus array persistence and reload
pub mod corpus_store;

/// Build bookkeeping report
pub mod build_report;
