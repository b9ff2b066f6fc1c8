//! Plotter-friendly text exports of a segment list.
//!
//! Every coordinate is written with three decimals, segments in input order:
//!
//! - **csv**: header `x1,y1,x2,y2`, then one row per segment.
//! - **json**: `{"lines": [{"x1", "y1", "x2", "y2"}, …], "count", "totalLength"}`.
//! - **text**: one `x1 y1 x2 y2` row per segment.
//! - **polylines**: segments merged by [`extract_polylines`], each written as
//!   `x y` point rows followed by a blank line.
//!
//! The writers propagate I/O errors from the destination. JSON has no
//! spelling for NaN or infinity, so `json` also rejects segments with a
//! non-finite coordinate before writing anything; the other formats print
//! them as Rust formats them (`NaN`, `inf`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use plotline_core::{extract_polylines, total_length, LineSegment, RenderError};

/// Names accepted by [`ExportFormat::from_name`].
const FORMAT_NAMES: &[&str] = &["csv", "json", "text", "polylines"];

/// Output format for [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
    Text,
    Polylines,
}

impl ExportFormat {
    /// Looks a format up by name (case-insensitive); `txt` is accepted for text.
    pub fn from_name(name: &str) -> Result<Self, RenderError> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            "polylines" | "polyline" => Ok(ExportFormat::Polylines),
            _ => Err(RenderError::UnknownFormat(name.to_string())),
        }
    }

    /// Picks a format from a file extension: `.csv`, `.json`, `.txt`, `.poly`.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "poly" => Ok(ExportFormat::Polylines),
            "" => Err(RenderError::UnknownFormat(path.display().to_string())),
            other => Self::from_name(other),
        }
    }

    /// Returns a slice of all recognized format names.
    pub fn list_formats() -> &'static [&'static str] {
        FORMAT_NAMES
    }

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text => "text",
            ExportFormat::Polylines => "polylines",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
            ExportFormat::Polylines => "poly",
        }
    }
}

pub fn write_csv<W: Write>(segments: &[LineSegment], mut out: W) -> Result<(), RenderError> {
    writeln!(out, "x1,y1,x2,y2")?;
    for s in segments {
        let (a, b) = (s.start(), s.end());
        writeln!(out, "{:.3},{:.3},{:.3},{:.3}", a.x, a.y, b.x, b.y)?;
    }
    Ok(())
}

/// Returns `RenderError::InvalidConfiguration` on field `lines` if any
/// coordinate, or the total length, is not finite.
pub fn write_json<W: Write>(segments: &[LineSegment], mut out: W) -> Result<(), RenderError> {
    if let Some((i, s)) = segments.iter().enumerate().find(|(_, s)| {
        let (a, b) = (s.start(), s.end());
        ![a.x, a.y, b.x, b.y].iter().all(|c| c.is_finite())
    }) {
        return Err(RenderError::invalid(
            "lines",
            format!("segment {i} has a non-finite coordinate: {s}"),
        ));
    }
    let total = total_length(segments);
    if !total.is_finite() {
        return Err(RenderError::invalid("lines", "total length overflows f64"));
    }

    writeln!(out, "{{")?;
    writeln!(out, "  \"lines\": [")?;
    for (i, s) in segments.iter().enumerate() {
        let (a, b) = (s.start(), s.end());
        let comma = if i + 1 < segments.len() { "," } else { "" };
        writeln!(
            out,
            "    {{\"x1\": {:.3}, \"y1\": {:.3}, \"x2\": {:.3}, \"y2\": {:.3}}}{comma}",
            a.x, a.y, b.x, b.y
        )?;
    }
    writeln!(out, "  ],")?;
    writeln!(out, "  \"count\": {},", segments.len())?;
    writeln!(out, "  \"totalLength\": {total:.3}")?;
    writeln!(out, "}}")?;
    Ok(())
}

pub fn write_text<W: Write>(segments: &[LineSegment], mut out: W) -> Result<(), RenderError> {
    for s in segments {
        let (a, b) = (s.start(), s.end());
        writeln!(out, "{:.3} {:.3} {:.3} {:.3}", a.x, a.y, b.x, b.y)?;
    }
    Ok(())
}

pub fn write_polylines<W: Write>(segments: &[LineSegment], mut out: W) -> Result<(), RenderError> {
    for polyline in extract_polylines(segments) {
        for p in polyline.points() {
            writeln!(out, "{:.3} {:.3}", p.x, p.y)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes `segments` to `out` in the given format.
pub fn export<W: Write>(
    format: ExportFormat,
    segments: &[LineSegment],
    out: W,
) -> Result<(), RenderError> {
    match format {
        ExportFormat::Csv => write_csv(segments, out),
        ExportFormat::Json => write_json(segments, out),
        ExportFormat::Text => write_text(segments, out),
        ExportFormat::Polylines => write_polylines(segments, out),
    }
}

/// Creates (or truncates) `path` and writes `segments` to it.
pub fn export_to_path(
    format: ExportFormat,
    segments: &[LineSegment],
    path: &Path,
) -> Result<(), RenderError> {
    let mut out = BufWriter::new(File::create(path)?);
    export(format, segments, &mut out)?;
    out.flush()?;
    debug!(
        "exported {} segments as {} to {}",
        segments.len(),
        format.name(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn render_to_string(format: ExportFormat, segments: &[LineSegment]) -> String {
        let mut buf = Vec::new();
        export(format, segments, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn three_four_five() -> Vec<LineSegment> {
        vec![LineSegment::from_coords(0.0, 0.0, 3.0, 4.0)]
    }

    #[test]
    fn csv_has_header_and_three_decimals() {
        let out = render_to_string(ExportFormat::Csv, &three_four_five());
        assert_eq!(out, "x1,y1,x2,y2\n0.000,0.000,3.000,4.000\n");
    }

    #[test]
    fn csv_of_nothing_is_just_the_header() {
        assert_eq!(render_to_string(ExportFormat::Csv, &[]), "x1,y1,x2,y2\n");
    }

    #[test]
    fn json_reports_count_and_total_length() {
        let out = render_to_string(ExportFormat::Json, &three_four_five());
        assert!(out.contains("\"totalLength\": 5.000"), "{out}");
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["totalLength"], 5.0);
        assert_eq!(parsed["lines"][0]["x2"], 3.0);
        assert_eq!(parsed["lines"][0]["y2"], 4.0);
    }

    #[test]
    fn json_separates_entries_with_commas() {
        let segments = vec![
            LineSegment::from_coords(0.0, 0.0, 1.0, 0.0),
            LineSegment::from_coords(1.0, 0.0, 1.0, 1.0),
        ];
        let parsed: serde_json::Value =
            serde_json::from_str(&render_to_string(ExportFormat::Json, &segments)).unwrap();
        assert_eq!(parsed["lines"].as_array().map(Vec::len), Some(2));
        assert_eq!(parsed["totalLength"], 2.0);
    }

    #[test]
    fn json_rejects_non_finite_coordinates() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let segments = vec![
                LineSegment::from_coords(0.0, 0.0, 1.0, 1.0),
                LineSegment::from_coords(1.0, 1.0, bad, 2.0),
            ];
            let mut buf = Vec::new();
            let result = write_json(&segments, &mut buf);
            assert!(
                matches!(result, Err(RenderError::InvalidConfiguration { field: "lines", ref reason }) if reason.contains("segment 1")),
                "{result:?}"
            );
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn json_rejects_overflowing_total_length() {
        let segments = vec![LineSegment::from_coords(-f64::MAX, 0.0, f64::MAX, 0.0)];
        let result = export(ExportFormat::Json, &segments, Vec::new());
        assert!(matches!(
            result,
            Err(RenderError::InvalidConfiguration { field: "lines", .. })
        ));
    }

    #[test]
    fn json_of_nothing_is_valid() {
        let parsed: serde_json::Value =
            serde_json::from_str(&render_to_string(ExportFormat::Json, &[])).unwrap();
        assert_eq!(parsed["count"], 0);
        assert_eq!(parsed["totalLength"], 0.0);
    }

    #[test]
    fn text_rows_are_space_separated() {
        let segments = vec![
            LineSegment::from_coords(1.0, 2.0, 3.5, 4.25),
            LineSegment::from_coords(0.0, 0.0, 0.1234, 9.0),
        ];
        assert_eq!(
            render_to_string(ExportFormat::Text, &segments),
            "1.000 2.000 3.500 4.250\n0.000 0.000 0.123 9.000\n"
        );
    }

    #[test]
    fn polylines_merge_and_separate_with_blank_lines() {
        let segments = vec![
            LineSegment::from_coords(0.0, 0.0, 1.0, 0.0),
            LineSegment::from_coords(5.0, 5.0, 6.0, 5.0),
            LineSegment::from_coords(1.0, 0.0, 1.0, 1.0),
        ];
        assert_eq!(
            render_to_string(ExportFormat::Polylines, &segments),
            "0.000 0.000\n1.000 0.000\n1.000 1.000\n\n5.000 5.000\n6.000 5.000\n\n"
        );
    }

    #[test]
    fn format_lookup_by_name_and_extension() {
        assert_eq!(ExportFormat::from_name("CSV").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_name("txt").unwrap(), ExportFormat::Text);
        assert!(matches!(
            ExportFormat::from_name("svg"),
            Err(RenderError::UnknownFormat(_))
        ));
        assert_eq!(
            ExportFormat::from_path(Path::new("out/plot.json")).unwrap(),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("plot.poly")).unwrap(),
            ExportFormat::Polylines
        );
        assert!(ExportFormat::from_path(Path::new("plot")).is_err());
        for name in ExportFormat::list_formats() {
            let format = ExportFormat::from_name(name).unwrap();
            assert_eq!(format.name(), *name);
            let file = format!("x.{}", format.extension());
            assert_eq!(ExportFormat::from_path(Path::new(&file)).unwrap(), format);
        }
    }

    #[test]
    fn export_to_path_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.csv");
        export_to_path(ExportFormat::Csv, &three_four_five(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "x1,y1,x2,y2\n0.000,0.000,3.000,4.000\n");
    }

    #[test]
    fn export_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("lines.csv");
        let result = export_to_path(ExportFormat::Csv, &three_four_five(), &path);
        assert!(matches!(result, Err(RenderError::Io(_))));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "plotter unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_failures_propagate_unchanged() {
        for format in [
            ExportFormat::Csv,
            ExportFormat::Json,
            ExportFormat::Text,
            ExportFormat::Polylines,
        ] {
            match export(format, &three_four_five(), FailingWriter) {
                Err(RenderError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
                other => panic!("{format:?}: expected Io error, got {other:?}"),
            }
        }
    }
}
