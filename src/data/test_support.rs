// Builders for throwaway on-disk archives used by the tests of
// the correlator, the assembler and the build use case.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::data::archive::ArchiveLayout;

pub struct ArchiveFixture {
    // Held so the directory lives as long as the fixture
    tmp:        TempDir,
    pub layout: ArchiveLayout,
}

impl ArchiveFixture {
    pub fn new() -> Self {
        let tmp    = TempDir::new().unwrap();
        let layout = ArchiveLayout::new(tmp.path().join("raw"), "ascii", "lineStrokes", "original");
        fs::create_dir_all(layout.transcription_root()).unwrap();
        Self { tmp, layout }
    }

    /// Scratch directory next to the archive, e.g. for outputs
    pub fn scratch(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    /// Write a transcription file whose CSR block holds `lines`.
    pub fn transcription(&self, rel: &str, lines: &[&str]) -> PathBuf {
        let body = format!("OCR:\n\n{}\n\nCSR:\n\n{}\n", lines.join("\n"), lines.join("\n"));
        self.transcription_raw(rel, &body)
    }

    pub fn transcription_raw(&self, rel: &str, body: &str) -> PathBuf {
        write(&self.layout.transcription_root().join(rel), body)
    }

    /// Write a line-stroke file with one stroke through `points`.
    pub fn stroke(&self, rel: &str, points: &[(i64, i64)]) -> PathBuf {
        write(&self.layout.stroke_root().join(rel), &stroke_xml(&[points]))
    }

    pub fn stroke_raw(&self, rel: &str, xml: &str) -> PathBuf {
        write(&self.layout.stroke_root().join(rel), xml)
    }

    /// Write a session metadata file; `None` leaves out `General`.
    pub fn metadata(&self, rel: &str, writer_id: Option<u32>) -> PathBuf {
        let general = writer_id
            .map(|id| format!(r#"<General><Form id="f" writerID="{id}"/></General>"#))
            .unwrap_or_default();
        let xml = format!("<WhiteboardCaptureSession>{general}<StrokeSet/></WhiteboardCaptureSession>");
        write(&self.layout.metadata_root().join(rel), &xml)
    }
}

pub fn stroke_xml(strokes: &[&[(i64, i64)]]) -> String {
    let mut xml = String::from("<WhiteboardCaptureSession><StrokeSet>");
    for stroke in strokes {
        xml.push_str("<Stroke>");
        for (x, y) in stroke.iter() {
            xml.push_str(&format!(r#"<Point x="{x}" y="{y}" time="0"/>"#));
        }
        xml.push_str("</Stroke>");
    }
    xml.push_str("</StrokeSet></WhiteboardCaptureSession>");
    xml
}

/// A gentle left-to-right scribble: small, even steps that stay
/// well under any outlier threshold after normalisation.
pub fn scribble(n: i64) -> Vec<(i64, i64)> {
    (0..n).map(|i| (i * 10, (i % 3) * 5)).collect()
}

fn write(path: &Path, content: &str) -> PathBuf {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
    path.to_path_buf()
}
