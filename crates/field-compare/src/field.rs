//! In-memory field samples: positions along a line and the B vector there
//!
//! Units follow the BDSIM 1D field map convention: position in cm, field in T.

use nalgebra::Vector3;
use std::collections::BTreeMap;

/// Tolerance used when deciding whether two position columns coincide (cm)
pub const POSITION_TOLERANCE: f64 = 1e-9;

/// Field component selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index into the field vector (0 = Bx)
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    /// Lower-case suffix used in output file names
    pub fn suffix(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// One row of a field map
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldRecord {
    pub position: f64,        // cm
    pub field: Vector3<f64>,  // Bx, By, Bz (T)
}

impl FieldRecord {
    pub fn new(position: f64, bx: f64, by: f64, bz: f64) -> Self {
        Self {
            position,
            field: Vector3::new(bx, by, bz),
        }
    }

    pub fn component(&self, axis: Axis) -> f64 {
        self.field[axis.index()]
    }

    /// Bx² + By² + Bz²
    pub fn magnitude_squared(&self) -> f64 {
        self.field.norm_squared()
    }
}

/// Value of a `key> value` header line
#[derive(Clone, Debug, PartialEq)]
pub enum HeaderValue {
    Number(f64),
    Text(String),
}

impl HeaderValue {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(v) => HeaderValue::Number(v),
            Err(_) => HeaderValue::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HeaderValue::Number(v) => Some(*v),
            HeaderValue::Text(_) => None,
        }
    }
}

/// A loaded field map
#[derive(Clone, Debug, Default)]
pub struct FieldSample {
    /// Header entries, keyed as written in the file
    pub header: BTreeMap<String, HeaderValue>,
    pub records: Vec<FieldRecord>,
}

impl FieldSample {
    pub fn from_records(records: Vec<FieldRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.position)
    }

    /// (position, component) pairs for one axis
    pub fn component_points(&self, axis: Axis) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.position, r.component(axis)))
            .collect()
    }

    /// (position, |B|²) pairs
    pub fn magnitude_points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.position, r.magnitude_squared()))
            .collect()
    }

    /// Number of points the header claims (`nx`), if any
    pub fn declared_points(&self) -> Option<usize> {
        let nx = self.header.get("nx")?.as_f64()?;
        if nx >= 0.0 && nx.fract() == 0.0 {
            Some(nx as usize)
        } else {
            None
        }
    }

    /// Smallest and largest position
    pub fn position_range(&self) -> Option<(f64, f64)> {
        self.positions().fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
    }

    /// True when both samples have the same positions, row for row
    pub fn positions_aligned(&self, other: &FieldSample) -> bool {
        self.len() == other.len()
            && self
                .positions()
                .zip(other.positions())
                .all(|(a, b)| (a - b).abs() <= POSITION_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rows() -> FieldSample {
        FieldSample::from_records(vec![
            FieldRecord::new(0.0, 1.0, 2.0, 3.0),
            FieldRecord::new(10.0, 1.1, 2.1, 3.1),
        ])
    }

    #[test]
    fn test_magnitude_is_sum_of_squares() {
        let mags = two_rows().magnitude_points();
        assert_eq!(mags[0], (0.0, 14.0));
        assert_eq!(mags[1].0, 10.0);
        assert!((mags[1].1 - 15.23).abs() < 1e-12);
    }

    #[test]
    fn test_component_points_select_column() {
        let sample = two_rows();
        assert_eq!(sample.component_points(Axis::Y), vec![(0.0, 2.0), (10.0, 2.1)]);
        assert_eq!(sample.component_points(Axis::Z)[0], (0.0, 3.0));
    }

    #[test]
    fn test_position_range() {
        assert_eq!(two_rows().position_range(), Some((0.0, 10.0)));
        assert_eq!(FieldSample::default().position_range(), None);
    }

    #[test]
    fn test_alignment() {
        let a = two_rows();
        let mut b = two_rows();
        assert!(a.positions_aligned(&b));

        b.records[1].position = 10.5;
        assert!(!a.positions_aligned(&b));

        b.records.pop();
        assert!(!a.positions_aligned(&b));
    }

    #[test]
    fn test_declared_points_from_header() {
        let mut sample = two_rows();
        assert_eq!(sample.declared_points(), None);
        sample.header.insert("nx".into(), HeaderValue::parse("2"));
        assert_eq!(sample.declared_points(), Some(2));
        sample.header.insert("nx".into(), HeaderValue::parse("many"));
        assert_eq!(sample.declared_points(), None);
    }
}
