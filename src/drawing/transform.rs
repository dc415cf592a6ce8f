// ============================================================
// Layer 5 — Geometry Transforms
// ============================================================
// Every function here takes and returns an (n, 3) matrix whose
// rows are (x, y, end_of_stroke). They are pure: the input is
// never modified and a new matrix is returned.
//
// Reference: Graves (2013) Generating Sequences With RNNs §4
//            ndarray crate documentation

use ndarray::{s, Array2, Axis};

use crate::domain::sample::RawStroke;
use crate::domain::traits::GeometryPipeline;

/// Savitzky–Golay smoothing weights for a 7-point window and a
/// cubic fit. Divide by `SAVGOL_NORM` after the dot product.
const SAVGOL_KERNEL: [f32; 7] = [-2.0, 3.0, 6.0, 7.0, 6.0, 3.0, -2.0];
const SAVGOL_NORM:   f32      = 21.0;

// ─── align ────────────────────────────────────────────────────────────────────
/// Remove global slant and baseline offset.
///
/// Fits `y = offset + slope * x` by least squares over all points,
/// rotates the trace by `atan(slope)` and shifts both axes by `offset`.
/// A trace with fewer than two points or no horizontal spread has no
/// defined slope and is returned unchanged.
pub fn align(coords: &Array2<f32>) -> Array2<f32> {
    let mut out = coords.clone();
    let n = coords.nrows();
    if n < 2 {
        return out;
    }

    let nf     = n as f64;
    let mean_x = coords.column(0).iter().map(|&v| v as f64).sum::<f64>() / nf;
    let mean_y = coords.column(1).iter().map(|&v| v as f64).sum::<f64>() / nf;

    let mut sxx = 0.0f64;
    let mut sxy = 0.0f64;
    for row in coords.rows() {
        let dx = row[0] as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (row[1] as f64 - mean_y);
    }
    if sxx <= f64::EPSILON {
        return out;
    }

    let slope  = sxy / sxx;
    let offset = mean_y - slope * mean_x;
    let (sin, cos) = slope.atan().sin_cos();

    // [x, y] · [[cos, -sin], [sin, cos]] - offset
    for mut row in out.rows_mut() {
        let x = row[0] as f64;
        let y = row[1] as f64;
        row[0] = (x * cos + y * sin - offset) as f32;
        row[1] = (-x * sin + y * cos - offset) as f32;
    }
    out
}

// ─── denoise ──────────────────────────────────────────────────────────────────
/// Smooth x and y within each stroke with a Savitzky–Golay filter.
///
/// Strokes are split after every row whose end flag is set; trailing
/// rows with no closing flag form a final stroke of their own. Window
/// positions that fall outside a stroke repeat the nearest edge value.
pub fn denoise(coords: &Array2<f32>) -> Array2<f32> {
    let mut out = coords.clone();
    let n = coords.nrows();

    let mut start = 0;
    for i in 0..n {
        if coords[[i, 2]] == 1.0 || i + 1 == n {
            for col in 0..2 {
                smooth_segment(coords, &mut out, start, i, col);
            }
            start = i + 1;
        }
    }
    out
}

/// Filter rows `start..=end` of one column into `out`.
fn smooth_segment(src: &Array2<f32>, out: &mut Array2<f32>, start: usize, end: usize, col: usize) {
    let half = (SAVGOL_KERNEL.len() / 2) as isize;
    for k in start..=end {
        let mut acc = 0.0f32;
        for (j, w) in SAVGOL_KERNEL.iter().enumerate() {
            let idx = (k as isize + j as isize - half).clamp(start as isize, end as isize) as usize;
            acc += w * src[[idx, col]];
        }
        out[[k, col]] = acc / SAVGOL_NORM;
    }
}

// ─── coords_to_offsets ────────────────────────────────────────────────────────
/// Re-express absolute points as deltas from the previous point.
///
/// Cardinality is preserved: the first row becomes `(0, 0, 1)` and
/// row `i` carries `(x_i - x_{i-1}, y_i - y_{i-1}, flag_i)`.
pub fn coords_to_offsets(coords: &Array2<f32>) -> Array2<f32> {
    let n = coords.nrows();
    let mut offsets = Array2::<f32>::zeros((n, 3));
    if n == 0 {
        return offsets;
    }

    offsets[[0, 2]] = 1.0;
    for i in 1..n {
        offsets[[i, 0]] = coords[[i, 0]] - coords[[i - 1, 0]];
        offsets[[i, 1]] = coords[[i, 1]] - coords[[i - 1, 1]];
        offsets[[i, 2]] = coords[[i, 2]];
    }
    offsets
}

/// Keep at most `max_len` leading rows.
pub fn truncate(offsets: &Array2<f32>, max_len: usize) -> Array2<f32> {
    let keep = offsets.nrows().min(max_len);
    offsets.slice(s![..keep, ..]).to_owned()
}

// ─── normalize ────────────────────────────────────────────────────────────────
/// Scale the delta columns so the median step has unit length.
///
/// A median of zero (or a non-finite one) gives no usable scale, so
/// the offsets come back unchanged.
pub fn normalize(offsets: &Array2<f32>) -> Array2<f32> {
    let mut out = offsets.clone();
    let Some(scale) = median(&step_norms(offsets)) else {
        return out;
    };
    if scale <= 0.0 || !scale.is_finite() {
        return out;
    }

    out.slice_mut(s![.., ..2]).mapv_inplace(|v| v / scale);
    out
}

/// Euclidean length of each row over its first two columns.
pub fn step_norms(offsets: &Array2<f32>) -> Vec<f32> {
    offsets
        .slice(s![.., ..2])
        .axis_iter(Axis(0))
        .map(|row| (row[0] * row[0] + row[1] * row[1]).sqrt())
        .collect()
}

fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

// ─── DrawingPipeline ──────────────────────────────────────────────────────────
/// The full align → denoise → offsets → truncate → normalize chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawingPipeline;

impl GeometryPipeline for DrawingPipeline {
    fn process(&self, raw: &RawStroke, max_len: usize) -> Array2<f32> {
        let coords  = align(&raw.to_coords());
        let coords  = denoise(&coords);
        let offsets = coords_to_offsets(&coords);
        let offsets = truncate(&offsets, max_len);
        normalize(&offsets)
    }
}
