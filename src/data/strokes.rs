// ============================================================
// Layer 4 — Stroke Geometry Extractor
// ============================================================
// Reads the pen trace from one line-stroke XML file:
//
//   <WhiteboardCaptureSession>
//     <StrokeSet>
//       <Stroke colour="black" start_time="..." end_time="...">
//         <Point x="1073" y="1058" time="..."/>
//         <Point x="1072" y="1085" time="..."/>
//       </Stroke>
//       ...
//
// Strokes and points are read in document order and flattened
// into one RawStroke. The whiteboard's y axis points down, so
// every y is negated on the way in.

use std::fs;
use std::path::Path;

use roxmltree::Node;

use crate::domain::error::{CorpusError, CorpusResult};
use crate::domain::sample::{RawStroke, StrokePoint};

/// Read and parse one line-stroke file.
pub fn read_raw_stroke(path: &Path) -> CorpusResult<RawStroke> {
    let bytes = fs::read(path).map_err(|e| CorpusError::io(path, e))?;
    parse_raw_stroke(path, &String::from_utf8_lossy(&bytes))
}

/// Parse line-stroke XML. `path` is only used for error reporting.
pub fn parse_raw_stroke(path: &Path, xml: &str) -> CorpusResult<RawStroke> {
    let doc = roxmltree::Document::parse(xml).map_err(|source| CorpusError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let stroke_set = doc
        .root_element()
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "StrokeSet")
        .ok_or_else(|| malformed(path, "no StrokeSet element"))?;

    let mut points = Vec::new();
    for stroke in stroke_set.children().filter(Node::is_element) {
        let stroke_points: Vec<Node> = stroke.children().filter(Node::is_element).collect();
        let last = stroke_points.len().saturating_sub(1);

        for (i, point) in stroke_points.iter().enumerate() {
            let x     = coordinate(path, point, "x")?;
            let raw_y = coordinate(path, point, "y")?;
            let y     = raw_y
                .checked_neg()
                .ok_or_else(|| malformed(path, format!("'y' value {raw_y} cannot be flipped")))?;
            points.push(StrokePoint { x, y, end_of_stroke: i == last });
        }
    }

    Ok(RawStroke::new(points))
}

fn coordinate(path: &Path, point: &Node, name: &str) -> CorpusResult<i64> {
    let raw = point
        .attribute(name)
        .ok_or_else(|| malformed(path, format!("point without '{name}' attribute")))?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| malformed(path, format!("'{name}' value '{raw}' is not an integer")))
}

fn malformed(path: &Path, reason: impl Into<String>) -> CorpusError {
    CorpusError::MalformedStrokes {
        path:   path.to_path_buf(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STROKES: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<WhiteboardCaptureSession>
  <WhiteboardDescription><SensorLocation corner="top_left"/></WhiteboardDescription>
  <StrokeSet>
    <Stroke colour="black" start_time="1" end_time="2">
      <Point x="10" y="20" time="1"/>
      <Point x="11" y="22" time="1.1"/>
      <Point x="12" y="25" time="1.2"/>
    </Stroke>
    <Stroke colour="black" start_time="3" end_time="4">
      <Point x="30" y="-5" time="3"/>
    </Stroke>
  </StrokeSet>
</WhiteboardCaptureSession>"#;

    #[test]
    fn test_flattens_strokes_with_end_flags() {
        let raw = parse_raw_stroke(Path::new("s.xml"), TWO_STROKES).unwrap();
        assert_eq!(
            raw.points,
            vec![
                StrokePoint { x: 10, y: -20, end_of_stroke: false },
                StrokePoint { x: 11, y: -22, end_of_stroke: false },
                StrokePoint { x: 12, y: -25, end_of_stroke: true },
                StrokePoint { x: 30, y: 5,   end_of_stroke: true },
            ]
        );
        assert_eq!(raw.stroke_count(), 2);
    }

    #[test]
    fn test_missing_stroke_set() {
        let err = parse_raw_stroke(Path::new("s.xml"), "<WhiteboardCaptureSession/>").unwrap_err();
        assert!(matches!(err, CorpusError::MalformedStrokes { .. }));
    }

    #[test]
    fn test_bad_coordinate() {
        let xml = r#"<S><StrokeSet><Stroke><Point x="1.5" y="2"/></Stroke></StrokeSet></S>"#;
        let err = parse_raw_stroke(Path::new("s.xml"), xml).unwrap_err();
        assert!(err.to_string().contains("'x' value '1.5'"));
    }

    #[test]
    fn test_unflippable_y_is_malformed() {
        let xml = r#"<S><StrokeSet><Stroke><Point x="1" y="-9223372036854775808"/></Stroke></StrokeSet></S>"#;
        let err = parse_raw_stroke(Path::new("s.xml"), xml).unwrap_err();
        assert!(matches!(err, CorpusError::MalformedStrokes { .. }));
    }

    #[test]
    fn test_invalid_xml() {
        let err = parse_raw_stroke(Path::new("s.xml"), "<S><StrokeSet>").unwrap_err();
        assert!(matches!(err, CorpusError::Xml { .. }));
    }
}
