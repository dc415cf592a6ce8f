// ============================================================
// Layer 4 — Writer-ID Resolver
// ============================================================
// The session metadata file carries the writer identity:
//
//   <WhiteboardCaptureSession>
//     <General>
//       <Form id="a01-000" writerID="10059" />
//       ...
//
// Missing metadata is normal in this corpus, so this resolver
// never fails: anything it cannot read becomes writer 0.

use std::fs;
use std::path::Path;

use crate::domain::error::{CorpusError, CorpusResult};

/// Writer id used when the metadata does not name one
pub const UNKNOWN_WRITER: i16 = 0;

/// Resolve the writer id of the session described by `path`.
///
/// A missing file, unparsable XML or an id that is not an integer in
/// `0..=i16::MAX` is logged and yields `UNKNOWN_WRITER`.
pub fn resolve_writer_id(path: &Path) -> i16 {
    // Session files declare ISO-8859-1; decode lossily so a stray
    // accented byte does not cost us the writer id.
    let parsed = fs::read(path)
        .map_err(|e| CorpusError::io(path, e))
        .and_then(|bytes| writer_id_from_xml(path, &String::from_utf8_lossy(&bytes)));

    match parsed {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Writer id defaults to {}: {}", UNKNOWN_WRITER, e);
            UNKNOWN_WRITER
        }
    }
}

/// Read `writerID` from the first child of the root's `General`
/// element. An absent element or attribute is not an error.
/// `path` is only used for error reporting.
pub fn writer_id_from_xml(path: &Path, xml: &str) -> CorpusResult<i16> {
    let doc = roxmltree::Document::parse(xml).map_err(|source| CorpusError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let general = doc
        .root_element()
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "General");
    let Some(general) = general else {
        return Ok(UNKNOWN_WRITER);
    };

    let Some(raw) = general
        .children()
        .find(|n| n.is_element())
        .and_then(|first| first.attribute("writerID"))
    else {
        return Ok(UNKNOWN_WRITER);
    };

    // w_id.npy stores i16, so larger ids cannot be represented
    raw.trim()
        .parse::<i16>()
        .ok()
        .filter(|id| *id >= 0)
        .ok_or_else(|| CorpusError::MalformedMetadata {
            path:   path.to_path_buf(),
            reason: format!("writerID '{raw}' is not an integer in 0..={}", i16::MAX),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_writer_id() {
        let xml = r#"<WhiteboardCaptureSession>
            <General><Form id="a01-000" writerID="10059"/></General>
        </WhiteboardCaptureSession>"#;
        assert_eq!(writer_id_from_xml(Path::new("strokes.xml"), xml).unwrap(), 10059);
    }

    #[test]
    fn test_missing_general_defaults_to_zero() {
        let xml = "<WhiteboardCaptureSession><StrokeSet/></WhiteboardCaptureSession>";
        assert_eq!(writer_id_from_xml(Path::new("strokes.xml"), xml).unwrap(), 0);
    }

    #[test]
    fn test_missing_attribute_defaults_to_zero() {
        let xml = r#"<S><General><Form id="x"/></General></S>"#;
        assert_eq!(writer_id_from_xml(Path::new("strokes.xml"), xml).unwrap(), 0);
    }

    #[test]
    fn test_only_first_child_is_consulted() {
        let xml = r#"<S><General><Form id="x"/><Other writerID="12"/></General></S>"#;
        assert_eq!(writer_id_from_xml(Path::new("strokes.xml"), xml).unwrap(), 0);
    }

    #[test]
    fn test_unreadable_metadata_resolves_to_zero() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(resolve_writer_id(&tmp.path().join("strokes.xml")), 0);

        let broken = tmp.path().join("broken.xml");
        fs::write(&broken, "<General><Form writerID=").unwrap();
        assert_eq!(resolve_writer_id(&broken), 0);

        let bad_id = tmp.path().join("bad_id.xml");
        fs::write(&bad_id, r#"<S><General><Form writerID="abc"/></General></S>"#).unwrap();
        assert_eq!(resolve_writer_id(&bad_id), 0);
    }

    #[test]
    fn test_ids_outside_the_column_range_are_malformed() {
        let path = Path::new("strokes.xml");
        for raw in ["40000", "-3", "32768"] {
            let xml = format!(r#"<S><General><Form writerID="{raw}"/></General></S>"#);
            let err = writer_id_from_xml(path, &xml).unwrap_err();
            assert!(matches!(err, CorpusError::MalformedMetadata { .. }), "{raw}");
        }

        let xml = r#"<S><General><Form writerID="32767"/></General></S>"#;
        assert_eq!(writer_id_from_xml(path, xml).unwrap(), i16::MAX);
    }

    #[test]
    fn test_broken_xml_is_a_typed_error() {
        let err = writer_id_from_xml(Path::new("strokes.xml"), "<General><Form writerID=").unwrap_err();
        assert!(matches!(err, CorpusError::Xml { .. }));
    }
}
