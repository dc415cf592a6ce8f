// ============================================================
// Layer 4 — Archive Layout
// ============================================================
// The three archives mirror each other below a common root:
//
//   data/raw/
//     ascii/a01/a01-000/a01-000u.txt           ← transcription
//     lineStrokes/a01/a01-000/a01-000u-01.xml  ← one per line
//     lineStrokes/a01/a01-000/a01-000u-02.xml
//     original/a01/a01-000/strokesu.xml        ← session metadata
//
// A transcription file is mapped onto its siblings by taking
// its directory relative to the transcription archive and
// re-rooting it under the other archive. The mapping works on
// whole path components, so a segment name that happens to
// appear elsewhere in the path (e.g. `/home/ascii-art/...`)
// is never rewritten.
//
// Reference: Rust Book §12 (Working with Paths)

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::{CorpusError, CorpusResult};

// ─── ArchiveLayout ────────────────────────────────────────────────────────────
/// Where the three archives live and what their top-level
/// directories are called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    /// Directory holding the three archive segments
    pub root: PathBuf,

    /// Segment name of the transcription archive, usually `ascii`
    pub transcription_segment: String,

    /// Segment name of the line-stroke archive, usually `lineStrokes`
    pub stroke_segment: String,

    /// Segment name of the session metadata archive, usually `original`
    pub metadata_segment: String,
}

impl ArchiveLayout {
    pub fn new(
        root:                  impl Into<PathBuf>,
        transcription_segment: impl Into<String>,
        stroke_segment:        impl Into<String>,
        metadata_segment:      impl Into<String>,
    ) -> Self {
        Self {
            root:                  root.into(),
            transcription_segment: transcription_segment.into(),
            stroke_segment:        stroke_segment.into(),
            metadata_segment:      metadata_segment.into(),
        }
    }

    pub fn transcription_root(&self) -> PathBuf {
        self.root.join(&self.transcription_segment)
    }

    pub fn stroke_root(&self) -> PathBuf {
        self.root.join(&self.stroke_segment)
    }

    pub fn metadata_root(&self) -> PathBuf {
        self.root.join(&self.metadata_segment)
    }

    /// Path of a transcription file relative to the transcription archive.
    pub fn relative_transcription(&self, transcription_file: &Path) -> CorpusResult<PathBuf> {
        let root = self.transcription_root();
        transcription_file
            .strip_prefix(&root)
            .map(Path::to_path_buf)
            .map_err(|_| CorpusError::OutsideArchive {
                path: transcription_file.to_path_buf(),
                root,
            })
    }

    /// The stroke directory that mirrors a transcription file's directory.
    pub fn stroke_dir_for(&self, transcription_file: &Path) -> CorpusResult<PathBuf> {
        Ok(self.stroke_root().join(self.session_subdir(transcription_file)?))
    }

    /// The metadata XML for a transcription file's session.
    pub fn metadata_xml_for(
        &self,
        transcription_file: &Path,
        key:                &SessionKey,
    ) -> CorpusResult<PathBuf> {
        Ok(self
            .metadata_root()
            .join(self.session_subdir(transcription_file)?)
            .join(key.metadata_file_name()))
    }

    /// Directory part of the relative transcription path.
    fn session_subdir(&self, transcription_file: &Path) -> CorpusResult<PathBuf> {
        let rel = self.relative_transcription(transcription_file)?;
        Ok(rel.parent().map(Path::to_path_buf).unwrap_or_default())
    }
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self::new("data/raw", "ascii", "lineStrokes", "original")
    }
}

// ─── SessionKey ───────────────────────────────────────────────────────────────
/// The naming convention linking one transcription file to its
/// stroke files and metadata file.
///
/// For `ascii/a01/a01-000/a01-000u.txt`:
///   - session directory name: `a01-000`
///   - trailing letter: `u`
///   - stroke file prefix: `a01-000u-`
///   - metadata file name: `strokesu.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey {
    pub dir_name: String,
    pub letter:   Option<char>,
}

impl SessionKey {
    /// Derive the key from a transcription file path. Returns `None`
    /// when the path has no usable directory or file stem.
    pub fn from_transcription(path: &Path) -> Option<Self> {
        let dir_name = path.parent()?.file_name()?.to_str()?.to_string();
        let stem     = path.file_stem()?.to_str()?;
        let letter   = stem.chars().last().filter(|c| c.is_alphabetic());
        Some(Self { dir_name, letter })
    }

    fn letter_str(&self) -> String {
        self.letter.map(String::from).unwrap_or_default()
    }

    pub fn stroke_prefix(&self) -> String {
        format!("{}{}-", self.dir_name, self.letter_str())
    }

    pub fn metadata_file_name(&self) -> String {
        format!("strokes{}.xml", self.letter_str())
    }
}

// ─── Leaf enumeration ─────────────────────────────────────────────────────────
/// Collect every leaf file below `root`, sorted by path.
///
/// A directory that has subdirectories contributes none of its own
/// files, only its children's. Hidden files (leading `.`) are ignored.
pub fn leaf_files(root: &Path) -> CorpusResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    collect_leaf_files(root, &mut out)?;
    Ok(out)
}

fn collect_leaf_files(dir: &Path, out: &mut Vec<PathBuf>) -> CorpusResult<()> {
    let mut files = Vec::new();
    let mut dirs  = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))? {
        let entry = entry.map_err(|e| CorpusError::io(dir, e))?;
        let path  = entry.path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            if !hidden {
                files.push(path);
            }
        }
    }

    if dirs.is_empty() {
        files.sort();
        out.extend(files);
        return Ok(());
    }

    dirs.sort();
    for sub in dirs {
        collect_leaf_files(&sub, out)?;
    }
    Ok(())
}

/// List the names of files in `dir` starting with `prefix`, in
/// ascending lexical order.
pub fn files_with_prefix(dir: &Path, prefix: &str) -> CorpusResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))? {
        let entry = entry.map_err(|e| CorpusError::io(dir, e))?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.starts_with(prefix) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_session_key_with_letter() {
        let key = SessionKey::from_transcription(Path::new("ascii/a01/a01-000/a01-000u.txt")).unwrap();
        assert_eq!(key.dir_name, "a01-000");
        assert_eq!(key.letter, Some('u'));
        assert_eq!(key.stroke_prefix(), "a01-000u-");
        assert_eq!(key.metadata_file_name(), "strokesu.xml");
    }

    #[test]
    fn test_session_key_without_letter() {
        let key = SessionKey::from_transcription(Path::new("ascii/a01/a01-011/a01-011.txt")).unwrap();
        assert_eq!(key.letter, None);
        assert_eq!(key.stroke_prefix(), "a01-011-");
        assert_eq!(key.metadata_file_name(), "strokes.xml");
    }

    #[test]
    fn test_layout_maps_whole_segments_only() {
        // The root itself contains the word "ascii"; only the archive
        // segment below the root may be swapped.
        let layout = ArchiveLayout::new("/corpora/ascii-art/raw", "ascii", "lineStrokes", "original");
        let file   = Path::new("/corpora/ascii-art/raw/ascii/a01/a01-000/a01-000u.txt");

        assert_eq!(
            layout.stroke_dir_for(file).unwrap(),
            PathBuf::from("/corpora/ascii-art/raw/lineStrokes/a01/a01-000")
        );

        let key = SessionKey::from_transcription(file).unwrap();
        assert_eq!(
            layout.metadata_xml_for(file, &key).unwrap(),
            PathBuf::from("/corpora/ascii-art/raw/original/a01/a01-000/strokesu.xml")
        );
    }

    #[test]
    fn test_layout_rejects_paths_outside_archive() {
        let layout = ArchiveLayout::default();
        let err = layout.stroke_dir_for(Path::new("elsewhere/a01/a01-000u.txt")).unwrap_err();
        assert!(matches!(err, CorpusError::OutsideArchive { .. }));
    }

    #[test]
    fn test_leaf_files_skips_non_leaf_dirs_and_hidden_files() {
        let tmp  = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("a01/readme.txt"));          // a01 has subdirs → ignored
        touch(&root.join("a01/a01-000/a01-000u.txt"));
        touch(&root.join("a01/a01-000/.DS_Store"));
        touch(&root.join("a01/a01-001/a01-001w.txt"));
        touch(&root.join("a01/a01-001/a01-001.txt"));

        let files: Vec<_> = leaf_files(root)
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            files,
            vec![
                PathBuf::from("a01/a01-000/a01-000u.txt"),
                PathBuf::from("a01/a01-001/a01-001.txt"),
                PathBuf::from("a01/a01-001/a01-001w.txt"),
            ]
        );
    }

    #[test]
    fn test_files_with_prefix_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["a01-000u-02.xml", "a01-000u-01.xml", "a01-000w-01.xml", "a01-000u-10.xml"] {
            touch(&tmp.path().join(name));
        }
        let names = files_with_prefix(tmp.path(), "a01-000u-").unwrap();
        assert_eq!(names, vec!["a01-000u-01.xml", "a01-000u-02.xml", "a01-000u-10.xml"]);
    }
}
