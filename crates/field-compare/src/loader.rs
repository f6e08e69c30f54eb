//! BDSIM field map reader
//!
//! Format (plain text, optionally gzip compressed):
//! - `# ...` comment lines
//! - `key> value` header lines (`xmin> -30`, `nx> 31`, ...)
//! - one `! X Fx Fy Fz` column line
//! - whitespace separated numeric rows

use crate::error::LoadError;
use crate::field::{FieldRecord, FieldSample, HeaderValue};
use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, warn};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read and parse a field map from disk
pub fn load(path: &Path) -> Result<FieldSample, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes = fs::read(path).map_err(io_err)?;
    let text = decode(&bytes).map_err(io_err)?;
    let sample = parse(&text)?;

    if let Some(declared) = sample.declared_points() {
        if declared != sample.len() {
            warn!(
                "{:?}: header declares nx={} but {} rows were read",
                path,
                declared,
                sample.len()
            );
        }
    }

    if let Some((lo, hi)) = sample.position_range() {
        info!(
            "Loaded {:?}: {} rows, position {:.3}..{:.3} cm",
            path,
            sample.len(),
            lo,
            hi
        );
    }

    Ok(sample)
}

/// Turn raw file bytes into text, inflating gzip content when present
pub fn decode(bytes: &[u8]) -> io::Result<String> {
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut text = String::new();
        GzDecoder::new(bytes).read_to_string(&mut text)?;
        Ok(text)
    } else {
        String::from_utf8(bytes.to_vec()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Column positions of the quantities we plot
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    position: usize,
    fx: usize,
    fy: usize,
    fz: usize,
}

impl Layout {
    const POSITIONAL: Layout = Layout {
        position: 0,
        fx: 1,
        fy: 2,
        fz: 3,
    };

    fn from_columns(columns: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| columns.iter().position(|c| c.eq_ignore_ascii_case(name));

        match (find("Fx"), find("Fy"), find("Fz")) {
            (Some(fx), Some(fy), Some(fz)) => Ok(Layout {
                position: 0,
                fx,
                fy,
                fz,
            }),
            (None, None, None) => Ok(Self::POSITIONAL),
            _ => Err(LoadError::MissingComponents(columns.to_vec())),
        }
    }
}

/// Parse field map text
pub fn parse(text: &str) -> Result<FieldSample, LoadError> {
    let mut sample = FieldSample::default();
    let mut layout = Layout::POSITIONAL;
    let mut width: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(names) = line.strip_prefix('!') {
            let columns: Vec<String> = names.split_whitespace().map(str::to_string).collect();
            if columns.len() < 4 {
                return Err(LoadError::TooFewColumns(columns.len()));
            }
            layout = Layout::from_columns(&columns)?;
            width = Some(columns.len());
            continue;
        }

        if let Some((key, value)) = line.split_once('>') {
            sample
                .header
                .insert(key.trim().to_string(), HeaderValue::parse(value.trim()));
            continue;
        }

        let values = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| LoadError::BadNumber {
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let expected = match width {
            Some(w) => w,
            None => {
                if values.len() < 4 {
                    return Err(LoadError::TooFewColumns(values.len()));
                }
                width = Some(values.len());
                values.len()
            }
        };

        if values.len() != expected {
            return Err(LoadError::ColumnCount {
                line: line_no,
                expected,
                found: values.len(),
            });
        }

        sample.records.push(FieldRecord::new(
            values[layout.position],
            values[layout.fx],
            values[layout.fy],
            values[layout.fz],
        ));
    }

    if sample.records.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const BDSIM_1D: &str = "\
# generated by pybdsim
xmin> -30.0
xmax> 30.0
nx> 3
loopOrder> xyzt
! X Fx Fy Fz
-30.0 0.5 -1.0 2.0
0.0 1.0 2.0 3.0
30.0 -0.5 1.0 -2.0
";

    #[test]
    fn test_parse_bdsim_header_and_rows() {
        let sample = parse(BDSIM_1D).unwrap();

        assert_eq!(sample.len(), 3);
        assert_eq!(sample.header["xmin"], HeaderValue::Number(-30.0));
        assert_eq!(sample.header["loopOrder"], HeaderValue::Text("xyzt".into()));
        assert_eq!(sample.declared_points(), Some(3));
        assert_eq!(sample.records[1], FieldRecord::new(0.0, 1.0, 2.0, 3.0));
    }

    #[test]
    fn test_plain_table_without_header() {
        let sample = parse("0 1 2 3\n10 1.1 2.1 3.1\n").unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.records[1].position, 10.0);
    }

    #[test]
    fn test_named_columns_are_reordered() {
        let sample = parse("! X Fz Fy Fx\n1 3 2 1\n").unwrap();
        assert_eq!(sample.records[0], FieldRecord::new(1.0, 1.0, 2.0, 3.0));
    }

    #[test]
    fn test_gzip_matches_plain() {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(BDSIM_1D.as_bytes()).unwrap();
        let compressed = enc.finish().unwrap();

        let inflated = decode(&compressed).unwrap();
        assert_eq!(inflated, BDSIM_1D);
        assert_eq!(parse(&inflated).unwrap().records, parse(BDSIM_1D).unwrap().records);
    }

    #[test]
    fn test_bad_number_reports_line() {
        let err = parse("! X Fx Fy Fz\n0 1 2 3\n1 1 two 3\n").unwrap_err();
        match err {
            LoadError::BadNumber { line, token } => {
                assert_eq!(line, 3);
                assert_eq!(token, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = parse("0 1 2 3\n1 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::ColumnCount { line: 2, expected: 4, found: 3 }
        ));
    }

    #[test]
    fn test_too_few_columns() {
        assert!(matches!(parse("0 1 2\n"), Err(LoadError::TooFewColumns(3))));
        assert!(matches!(parse("! X Fx\n"), Err(LoadError::TooFewColumns(2))));
    }

    #[test]
    fn test_partial_component_names_rejected() {
        assert!(matches!(
            parse("! X Fx Fy Q\n0 1 2 3\n"),
            Err(LoadError::MissingComponents(_))
        ));
    }

    #[test]
    fn test_empty_map_rejected() {
        assert!(matches!(parse("# nothing\nnx> 0\n"), Err(LoadError::Empty)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load(Path::new("/nonexistent/field.dat")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
