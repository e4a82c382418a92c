//! TSPLIB-style instance loading.
//!
//! Only the parts of the format needed for symmetric Euclidean instances
//! are read: the `NAME` header and the `NODE_COORD_SECTION` block up to
//! `EOF`. Coordinate lines that cannot be parsed are skipped with a
//! warning instead of failing the load.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};

const SECTION_START: &str = "NODE_COORD_SECTION";
const SECTION_END: &str = "EOF";
const DEFAULT_NAME: &str = "instance";

/// A named set of planar city coordinates.
///
/// City `k` of every tour refers to the `k`-th coordinate line that was
/// read, whatever id the file gave it.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub name: String,
    pub coordinates: Vec<(f64, f64)>,
}

impl Instance {
    /// Parses instance text.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::Parse`] if there is no `NODE_COORD_SECTION`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_metaheur::Instance;
    ///
    /// let text = "NAME : square\nNODE_COORD_SECTION\n1 0 0\n2 0 1\n3 1 1\n4 1 0\nEOF\n";
    /// let instance = Instance::parse(text).unwrap();
    /// assert_eq!(instance.name, "square");
    /// assert_eq!(instance.len(), 4);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        parse_with_default_name(text, DEFAULT_NAME)
    }

    /// Reads and parses an instance file; the file stem names the instance
    /// unless the file has a `NAME` header.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_NAME);
        parse_with_default_name(&text, stem)
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Euclidean distance matrix over the coordinates.
    pub fn distance_matrix(&self) -> Result<DistanceMatrix> {
        DistanceMatrix::from_coordinates(&self.coordinates)
    }
}

fn parse_with_default_name(text: &str, default_name: &str) -> Result<Instance> {
    let mut lines = text.lines().map(str::trim);
    let mut name = None;

    loop {
        match lines.next() {
            Some(SECTION_START) => break,
            Some(line) => {
                if let Some((key, value)) = line.split_once(':') {
                    if key.trim() == "NAME" {
                        name = Some(value.trim().to_string());
                    }
                }
            }
            None => {
                return Err(TspError::Parse(format!("missing {SECTION_START}")));
            }
        }
    }

    let mut coordinates = Vec::new();
    for line in lines.take_while(|line| *line != SECTION_END) {
        if line.is_empty() {
            continue;
        }
        match parse_coordinate(line) {
            Some(point) => coordinates.push(point),
            None => warn!(line, "skipping malformed coordinate line"),
        }
    }

    let name = name.unwrap_or_else(|| default_name.to_string());
    debug!(name = %name, cities = coordinates.len(), "instance parsed");

    Ok(Instance { name, coordinates })
}

/// Parses `id x y`, rejecting non-finite values.
fn parse_coordinate(line: &str) -> Option<(f64, f64)> {
    let mut parts = line.split_whitespace();
    let _id = parts.next()?;
    let x = parts.next()?.parse::<f64>().ok()?;
    let y = parts.next()?.parse::<f64>().ok()?;
    (x.is_finite() && y.is_finite()).then_some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
NAME : square4
COMMENT : unit square
TYPE : TSP
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0.0 0.0
2 0.0 1.0
3 1.0 1.0
4 1.0 0.0
EOF
";

    #[test]
    fn test_parse_header_and_section() {
        let instance = Instance::parse(SQUARE).unwrap();
        assert_eq!(instance.name, "square4");
        assert_eq!(
            instance.coordinates,
            vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
        );
    }

    #[test]
    fn test_skips_malformed_lines() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 abc 1\n3 1\n4 1 1\n5 nan 2\n\n6 2 2\nEOF\n";
        let instance = Instance::parse(text).unwrap();
        assert_eq!(instance.coordinates, vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(instance.name, DEFAULT_NAME);
    }

    #[test]
    fn test_missing_eof_reads_to_end() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 3 4";
        let instance = Instance::parse(text).unwrap();
        assert_eq!(instance.len(), 2);
    }

    #[test]
    fn test_ignores_lines_after_eof() {
        let text = "NODE_COORD_SECTION\n1 0 0\nEOF\n2 3 4\n";
        let instance = Instance::parse(text).unwrap();
        assert_eq!(instance.len(), 1);
    }

    #[test]
    fn test_missing_section_is_error() {
        let err = Instance::parse("NAME : x\nTYPE : TSP\n");
        assert!(matches!(err, Err(TspError::Parse(_))));
    }

    #[test]
    fn test_distance_matrix() {
        let m = Instance::parse(SQUARE).unwrap().distance_matrix().unwrap();
        assert_eq!(m.len(), 4);
        assert!((m.get(0, 2) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_from_file_uses_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny5.tsp");
        fs::write(&path, "NODE_COORD_SECTION\n1 0 0\n2 1 0\nEOF\n").unwrap();

        let instance = Instance::from_file(&path).unwrap();
        assert_eq!(instance.name, "tiny5");
        assert_eq!(instance.len(), 2);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Instance::from_file("/nonexistent/dir/none.tsp");
        assert!(matches!(err, Err(TspError::Io(_))));
    }
}
