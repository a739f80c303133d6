use std::path::Path;

use crate::error::{ParseError, Result};
use crate::geometry::Polygon;

/// Number of trailing tokens on each record that carry metadata, not coordinates.
pub const METADATA_TOKENS: usize = 2;

/// Parses wall records, one polygon per non-blank line.
///
/// Each line holds whitespace-separated integer tokens taken pairwise as
/// `(x, y)`; the final [`METADATA_TOKENS`] tokens are dropped unread. Lines
/// carrying nothing but metadata are skipped like blank ones.
///
/// # Errors
///
/// Returns `ParseError::MalformedRecord` if a line has an odd number of
/// coordinate tokens, a non-integer coordinate, or fewer than two vertices.
pub fn parse_records(text: &str) -> std::result::Result<Vec<Polygon>, ParseError> {
    let mut polygons = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let line_no = i + 1;
        if tokens.len() <= METADATA_TOKENS {
            if !tokens.is_empty() {
                tracing::debug!(line = line_no, "skipped record without coordinates");
            }
            continue;
        }
        let coords = &tokens[..tokens.len() - METADATA_TOKENS];
        polygons.push(parse_coordinates(coords, line_no)?);
    }
    Ok(polygons)
}

/// Reads and parses a wall record file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or any error of
/// [`parse_records`].
pub fn read_records(path: &Path) -> Result<Vec<Polygon>> {
    let text = std::fs::read_to_string(path)?;
    let polygons = parse_records(&text)?;
    tracing::debug!(path = %path.display(), polygons = polygons.len(), "read wall records");
    Ok(polygons)
}

fn parse_coordinates(tokens: &[&str], line: usize) -> std::result::Result<Polygon, ParseError> {
    if tokens.len() % 2 != 0 {
        return Err(ParseError::MalformedRecord {
            line,
            reason: format!("odd number of coordinate tokens ({})", tokens.len()),
        });
    }
    if tokens.len() < 4 {
        return Err(ParseError::MalformedRecord {
            line,
            reason: "at least 2 vertices required".to_owned(),
        });
    }

    let mut coords = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks_exact(2) {
        let x = parse_int(pair[0], line)?;
        let y = parse_int(pair[1], line)?;
        coords.push((x, y));
    }
    Ok(Polygon::from_coords(&coords))
}

fn parse_int(token: &str, line: usize) -> std::result::Result<i64, ParseError> {
    token.parse().map_err(|_| ParseError::MalformedRecord {
        line,
        reason: format!("{token:?} is not an integer coordinate"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    #[test]
    fn drops_trailing_metadata() {
        let polys = parse_records("0 0 10 0 10 10 0 10 wall 1\n").unwrap();
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].vertices.len(), 4);
        assert_eq!(polys[0].vertices[2], Point2::new(10.0, 10.0));
    }

    #[test]
    fn skips_blank_lines() {
        let text = "\n0 0 5 0 5 5 a b\n   \n1 1 2 2 a b\n";
        assert_eq!(parse_records(text).unwrap().len(), 2);
    }

    #[test]
    fn odd_token_count_is_malformed() {
        let err = parse_records("0 0 10 0 10 a b\n").unwrap_err();
        let ParseError::MalformedRecord { line, reason } = err;
        assert_eq!(line, 1);
        assert!(reason.contains("odd"), "reason={reason}");
    }

    #[test]
    fn non_integer_is_malformed_with_line_number() {
        let err = parse_records("0 0 1 0 1 1 a b\n0 0 x 0 1 1 a b\n").unwrap_err();
        let ParseError::MalformedRecord { line, .. } = err;
        assert_eq!(line, 2);
    }

    #[test]
    fn single_vertex_is_malformed() {
        assert!(parse_records("3 4 a b\n").is_err());
    }

    #[test]
    fn metadata_only_line_is_skipped() {
        let polys = parse_records("0 0 10 0 10 10 0 10 wall 1\nroom 3\n").unwrap();
        assert_eq!(polys.len(), 1);
        assert!(parse_records("room\n").unwrap().is_empty());
        // Odd coordinate counts still fail.
        assert!(parse_records("5 room 3\n").is_err());
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.txt");
        std::fs::write(&path, "0 0 4 0 4 4 0 4 x y\n").unwrap();
        let polys = read_records(&path).unwrap();
        assert_eq!(polys.len(), 1);
    }
}
