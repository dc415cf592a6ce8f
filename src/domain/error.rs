// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every fatal condition the data layer can hit, as a typed
// value carrying the offending path. The application layer
// wraps these in anyhow with extra context.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    /// The stroke archive and the transcription archive disagree
    /// on how many lines a session has.
    #[error(
        "archive inconsistency in '{}': {strokes} stroke files but {lines} transcription lines",
        path.display()
    )]
    CountMismatch {
        path:    PathBuf,
        strokes: usize,
        lines:   usize,
    },

    #[error("no 'CSR:' marker in a transcription block of '{}'", path.display())]
    MissingMarker { path: PathBuf },

    #[error("cannot parse XML in '{}': {source}", path.display())]
    Xml {
        path:   PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("malformed stroke file '{}': {reason}", path.display())]
    MalformedStrokes { path: PathBuf, reason: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not inside the archive root '{}'", path.display(), root.display())]
    OutsideArchive { path: PathBuf, root: PathBuf },

    /// Session metadata that exists but cannot yield a writer id.
    /// Never fatal: the resolver logs it and falls back to writer 0.
    #[error("malformed session metadata '{}': {reason}", path.display())]
    MalformedMetadata { path: PathBuf, reason: String },
}

impl CorpusError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type CorpusResult<T> = std::result::Result<T, CorpusError>;
