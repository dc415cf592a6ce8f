// ============================================================
// Layer 3 — Sample and RawStroke Domain Types
// ============================================================
// A Sample is one unit of training data produced by the
// correlator: a single line-stroke XML file paired with the
// transcription line written in it and the id of its writer.
//
// A RawStroke is the pen trace of one XML file, flattened
// across all strokes. Stroke boundaries survive only as the
// end-of-stroke flag on the last point of each stroke:
//
//   stroke 1: (x0,y0,0) (x1,y1,0) (x2,y2,1)
//   stroke 2: (x3,y3,0) (x4,y4,1)
//
// Reference: Rust Book §5 (Structs)

use std::path::PathBuf;

use ndarray::Array2;

/// One correlated (stroke file, transcription line, writer id) triple.
///
/// Created once by the correlator and consumed once by the
/// assembler. Never mutated in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Full path to the line-stroke XML file
    pub stroke_path: PathBuf,

    /// The transcription line as it appeared in the text file
    pub text: String,

    /// Encoded symbols, already truncated to MAX_CHAR_LEN
    pub symbols: Vec<u8>,

    /// Writer identity, 0 when unknown. Always fits the i16 id column.
    pub writer_id: i16,
}

impl Sample {
    pub fn new(
        stroke_path: impl Into<PathBuf>,
        text:        impl Into<String>,
        symbols:     Vec<u8>,
        writer_id:   i16,
    ) -> Self {
        Self {
            stroke_path: stroke_path.into(),
            text:        text.into(),
            symbols,
            writer_id,
        }
    }

    /// Basename of the stroke file, used for blacklist lookups and logs
    pub fn stroke_file_name(&self) -> &str {
        self.stroke_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
    }
}

/// A single pen position as captured on the whiteboard.
/// `y` is already flipped so that "up" is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokePoint {
    pub x: i64,
    pub y: i64,
    pub end_of_stroke: bool,
}

/// The flattened pen trace of one capture file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStroke {
    pub points: Vec<StrokePoint>,
}

impl RawStroke {
    pub fn new(points: Vec<StrokePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of pen-down strokes, counted by end-of-stroke flags
    pub fn stroke_count(&self) -> usize {
        self.points.iter().filter(|p| p.end_of_stroke).count()
    }

    /// Convert to an (n, 3) float matrix: columns are x, y, end flag.
    /// This is the shape every geometry transform works on.
    pub fn to_coords(&self) -> Array2<f32> {
        let mut coords = Array2::<f32>::zeros((self.points.len(), 3));
        for (i, p) in self.points.iter().enumerate() {
            coords[[i, 0]] = p.x as f32;
            coords[[i, 1]] = p.y as f32;
            coords[[i, 2]] = if p.end_of_stroke { 1.0 } else { 0.0 };
        }
        coords
    }
}
