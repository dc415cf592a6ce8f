// ============================================================
// Layer 3 — Corpus Domain Type
// ============================================================
// The output of a build: five parallel fixed-shape arrays that
// share their first dimension and row order.
//
//   strokes      [N, MAX_STROKE_LEN, 3]  f32  (dx, dy, end flag)
//   stroke_lens  [N]                     i16
//   chars        [N, MAX_CHAR_LEN]       i8   symbol indices
//   char_lens    [N]                     i8
//   writer_ids   [N]                     i16  0 = unknown
//
// Positions at or past a row's declared length are zero and
// carry no data.

use ndarray::{s, Array1, Array2, Array3, Axis};

use crate::drawing::{MAX_CHAR_LEN, MAX_STROKE_LEN};

#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    pub strokes:     Array3<f32>,
    pub stroke_lens: Array1<i16>,
    pub chars:       Array2<i8>,
    pub char_lens:   Array1<i8>,
    pub writer_ids:  Array1<i16>,
}

impl Corpus {
    /// Allocate `n` zero-filled rows.
    pub fn zeros(n: usize) -> Self {
        Self {
            strokes:     Array3::zeros((n, MAX_STROKE_LEN, 3)),
            stroke_lens: Array1::zeros(n),
            chars:       Array2::zeros((n, MAX_CHAR_LEN)),
            char_lens:   Array1::zeros(n),
            writer_ids:  Array1::zeros(n),
        }
    }

    pub fn len(&self) -> usize {
        self.strokes.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A new corpus holding only the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            strokes:     self.strokes.select(Axis(0), rows),
            stroke_lens: self.stroke_lens.select(Axis(0), rows),
            chars:       self.chars.select(Axis(0), rows),
            char_lens:   self.char_lens.select(Axis(0), rows),
            writer_ids:  self.writer_ids.select(Axis(0), rows),
        }
    }

    /// Check the shape and padding invariants. Returns a description
    /// of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let n = self.len();
        let dims = [
            ("stroke_lens", self.stroke_lens.len()),
            ("chars",       self.chars.len_of(Axis(0))),
            ("char_lens",   self.char_lens.len()),
            ("writer_ids",  self.writer_ids.len()),
        ];
        for (name, len) in dims {
            if len != n {
                return Err(format!("{name} has {len} rows, strokes has {n}"));
            }
        }
        if self.strokes.dim().1 != MAX_STROKE_LEN || self.strokes.dim().2 != 3 {
            return Err(format!("strokes has shape {:?}", self.strokes.dim()));
        }
        if self.chars.dim().1 != MAX_CHAR_LEN {
            return Err(format!("chars has shape {:?}", self.chars.dim()));
        }

        for i in 0..n {
            let stroke_len = self.stroke_lens[i];
            if stroke_len < 0 || stroke_len as usize > MAX_STROKE_LEN {
                return Err(format!("row {i}: stroke length {stroke_len} out of range"));
            }
            let stroke_end = stroke_len as usize;
            if self.strokes.slice(s![i, stroke_end.., ..]).iter().any(|&v| v != 0.0) {
                return Err(format!("row {i}: non-zero stroke padding"));
            }

            let char_len = self.char_lens[i];
            if char_len < 0 || char_len as usize > MAX_CHAR_LEN {
                return Err(format!("row {i}: char length {char_len} out of range"));
            }
            let char_end = char_len as usize;
            if self.chars.slice(s![i, char_end..]).iter().any(|&v| v != 0) {
                return Err(format!("row {i}: non-zero char padding"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_is_consistent() {
        let corpus = Corpus::zeros(3);
        assert_eq!(corpus.len(), 3);
        assert!(corpus.check_invariants().is_ok());
    }

    #[test]
    fn test_select_rows_keeps_columns_aligned() {
        let mut corpus = Corpus::zeros(3);
        for i in 0..3 {
            corpus.writer_ids[i]      = i as i16 + 10;
            corpus.stroke_lens[i]     = 1;
            corpus.strokes[[i, 0, 0]] = i as f32;
        }
        let picked = corpus.select_rows(&[2, 0]);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.writer_ids.to_vec(), vec![12, 10]);
        assert_eq!(picked.strokes[[0, 0, 0]], 2.0);
        assert_eq!(picked.strokes[[1, 0, 0]], 0.0);
    }

    #[test]
    fn test_detects_dirty_padding() {
        let mut corpus = Corpus::zeros(1);
        corpus.stroke_lens[0] = 2;
        corpus.strokes[[0, 5, 1]] = 0.5;
        assert!(corpus.check_invariants().unwrap_err().contains("stroke padding"));
    }
}
