// ============================================================
// Layer 6 — Corpus Store
// ============================================================
// Persists a corpus as five parallel .npy files and reads it
// back. Every build overwrites the previous files wholesale.
//
//   data/processed/
//     x.npy               ← strokes      [N, 1200, 3] f32
//     x_len.npy           ← stroke_lens  [N]          i16
//     c.npy               ← chars        [N, 75]      i8
//     c_len.npy           ← char_lens    [N]          i8
//     w_id.npy            ← writer_ids   [N]          i16
//     build_config.json   ← the BuildConfig of the run
//
// The .npy format keeps the arrays loadable from numpy as well
// as from Rust.
//
// Reference: ndarray-npy crate documentation

use anyhow::{bail, Context, Result};
use ndarray::{Array1, Array2, Array3};
use ndarray_npy::{read_npy, write_npy, WriteNpyExt};
use std::{fs, path::{Path, PathBuf}};
use tempfile::TempDir;

use crate::application::build_use_case::BuildConfig;
use crate::domain::corpus::Corpus;

pub const STROKES_FILE:     &str = "x.npy";
pub const STROKE_LENS_FILE: &str = "x_len.npy";
pub const CHARS_FILE:       &str = "c.npy";
pub const CHAR_LENS_FILE:   &str = "c_len.npy";
pub const WRITER_IDS_FILE:  &str = "w_id.npy";
pub const CONFIG_FILE:      &str = "build_config.json";

const ARRAY_FILES: [&str; 5] = [
    STROKES_FILE,
    STROKE_LENS_FILE,
    CHARS_FILE,
    CHAR_LENS_FILE,
    WRITER_IDS_FILE,
];

/// Name prefix of the scratch directory a save writes into
const STAGING_PREFIX: &str = ".staging-";

pub struct CorpusStore {
    dir: PathBuf,
}

impl CorpusStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write all five arrays, creating the directory if needed.
    ///
    /// The arrays are first written into a scratch directory inside
    /// `dir` and only moved over the previous set once all five exist.
    /// A save that fails while writing leaves the old corpus untouched.
    pub fn save(&self, corpus: &Corpus) -> Result<()> {
        let staged = self.stage(corpus)?;
        self.commit(staged)?;
        tracing::info!("Saved {} samples to '{}'", corpus.len(), self.dir.display());
        Ok(())
    }

    /// Write the five arrays into a fresh scratch directory. The
    /// directory is removed when the returned handle is dropped.
    fn stage(&self, corpus: &Corpus) -> Result<TempDir> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.dir)
            .with_context(|| format!("Cannot create a staging directory in '{}'", self.dir.display()))?;

        write_array(staging.path(), STROKES_FILE, &corpus.strokes)?;
        write_array(staging.path(), STROKE_LENS_FILE, &corpus.stroke_lens)?;
        write_array(staging.path(), CHARS_FILE, &corpus.chars)?;
        write_array(staging.path(), CHAR_LENS_FILE, &corpus.char_lens)?;
        write_array(staging.path(), WRITER_IDS_FILE, &corpus.writer_ids)?;
        Ok(staging)
    }

    /// Move a complete staged set over the current one.
    fn commit(&self, staged: TempDir) -> Result<()> {
        for file in ARRAY_FILES {
            let target = self.path(file);
            fs::rename(staged.path().join(file), &target)
                .with_context(|| format!("Cannot move '{}' into place", target.display()))?;
        }
        Ok(())
    }

    /// Read all five arrays back. Fails if they disagree on the
    /// number of rows.
    pub fn load(&self) -> Result<Corpus> {
        let corpus = Corpus {
            strokes:     self.read::<Array3<f32>>(STROKES_FILE)?,
            stroke_lens: self.read::<Array1<i16>>(STROKE_LENS_FILE)?,
            chars:       self.read::<Array2<i8>>(CHARS_FILE)?,
            char_lens:   self.read::<Array1<i8>>(CHAR_LENS_FILE)?,
            writer_ids:  self.read::<Array1<i16>>(WRITER_IDS_FILE)?,
        };

        let n = corpus.len();
        let rows = [
            corpus.stroke_lens.len(),
            corpus.chars.nrows(),
            corpus.char_lens.len(),
            corpus.writer_ids.len(),
        ];
        if rows.iter().any(|&r| r != n) {
            bail!(
                "Corpus in '{}' is inconsistent: strokes has {} rows, others have {:?}",
                self.dir.display(),
                n,
                rows
            );
        }

        tracing::debug!("Loaded {} samples from '{}'", n, self.dir.display());
        Ok(corpus)
    }

    /// Save the configuration a corpus was built with.
    pub fn save_config(&self, cfg: &BuildConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;
        let path = self.path(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved build config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<BuildConfig> {
        let path = self.path(CONFIG_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read<T: ndarray_npy::ReadNpyExt>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        read_npy(&path).with_context(|| {
            format!("Cannot read '{}'. Has a corpus been built here?", path.display())
        })
    }
}

fn write_array<T: WriteNpyExt>(dir: &Path, file: &str, array: &T) -> Result<()> {
    let path = dir.join(file);
    write_npy(&path, array).with_context(|| format!("Cannot write '{}'", path.display()))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let store = CorpusStore::new(tmp.path().join("processed"));

        let mut corpus = Corpus::zeros(2);
        corpus.strokes[[0, 0, 2]] = 1.0;
        corpus.strokes[[0, 1, 0]] = -0.75;
        corpus.stroke_lens[0]     = 2;
        corpus.chars[[1, 0]]      = 72;
        corpus.char_lens[1]       = 1;
        corpus.writer_ids[1]      = 10059;

        store.save(&corpus).unwrap();
        assert_eq!(store.load().unwrap(), corpus);
    }

    #[test]
    fn test_save_overwrites_previous_corpus() {
        let tmp = TempDir::new().unwrap();
        let store = CorpusStore::new(tmp.path());

        store.save(&Corpus::zeros(4)).unwrap();
        store.save(&Corpus::zeros(1)).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_unfinished_save_leaves_previous_corpus() {
        let tmp = TempDir::new().unwrap();
        let store = CorpusStore::new(tmp.path());

        let mut previous = Corpus::zeros(2);
        previous.writer_ids[0] = 7;
        store.save(&previous).unwrap();

        // Staged but never committed, as when a later array fails to write
        let staged = store.stage(&Corpus::zeros(5)).unwrap();
        assert!(staged.path().join(WRITER_IDS_FILE).exists());
        drop(staged);

        assert_eq!(store.load().unwrap(), previous);
    }

    #[test]
    fn test_save_leaves_no_staging_directory() {
        let tmp = TempDir::new().unwrap();
        let store = CorpusStore::new(tmp.path());
        store.save(&Corpus::zeros(1)).unwrap();
        store.save(&Corpus::zeros(2)).unwrap();

        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(STAGING_PREFIX))
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
    }

    #[test]
    fn test_load_rejects_mismatched_rows() {
        let tmp = TempDir::new().unwrap();
        let store = CorpusStore::new(tmp.path());
        store.save(&Corpus::zeros(2)).unwrap();
        write_npy(tmp.path().join(WRITER_IDS_FILE), &Array1::<i16>::zeros(3)).unwrap();

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("inconsistent"));
    }

    #[test]
    fn test_load_missing_corpus() {
        let tmp = TempDir::new().unwrap();
        assert!(CorpusStore::new(tmp.path().join("nothing")).load().is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = CorpusStore::new(tmp.path());
        let cfg = BuildConfig { max_offset_norm: 42.0, ..BuildConfig::default() };

        store.save_config(&cfg).unwrap();
        assert_eq!(store.load_config().unwrap(), cfg);
    }
}
