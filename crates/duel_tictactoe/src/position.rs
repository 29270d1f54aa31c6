//! Board coordinates.

use crate::action::CoordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// A (row, column) pair on the board, each in `0..=2`.
///
/// A `Coord` can only be built in range, so the engine never sees an
/// out-of-bounds move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCoord")]
pub struct Coord {
    row: usize,
    col: usize,
}

#[derive(Deserialize)]
struct RawCoord {
    row: usize,
    col: usize,
}

impl TryFrom<RawCoord> for Coord {
    type Error = CoordError;

    fn try_from(raw: RawCoord) -> Result<Self, Self::Error> {
        Coord::new(raw.row, raw.col)
    }
}

impl Coord {
    /// All nine coordinates, row-major.
    pub const ALL: [Coord; 9] = [
        Coord::at(0, 0),
        Coord::at(0, 1),
        Coord::at(0, 2),
        Coord::at(1, 0),
        Coord::at(1, 1),
        Coord::at(1, 2),
        Coord::at(2, 0),
        Coord::at(2, 1),
        Coord::at(2, 2),
    ];

    /// Creates a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError`] if `row` or `col` is outside `0..=2`.
    #[instrument]
    pub fn new(row: usize, col: usize) -> Result<Self, CoordError> {
        if row > 2 || col > 2 {
            return Err(CoordError { row, col });
        }
        Ok(Self::at(row, col))
    }

    const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Zero-based row.
    pub fn row(self) -> usize {
        self.row
    }

    /// Zero-based column.
    pub fn col(self) -> usize {
        self.col
    }

    pub(crate) fn index(self) -> usize {
        self.row * 3 + self.col
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_coords_in_range() {
        for row in 0..3 {
            for col in 0..3 {
                let at = Coord::new(row, col).expect("in range");
                assert_eq!(Coord::from_index(at.index()), at);
            }
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(Coord::new(3, 0), Err(CoordError { row: 3, col: 0 }));
        assert_eq!(Coord::new(0, 7), Err(CoordError { row: 0, col: 7 }));
    }

    #[test]
    fn test_deserialize_validates_range() {
        let ok: Coord = serde_json::from_str(r#"{"row":2,"col":1}"#).expect("valid");
        assert_eq!((ok.row(), ok.col()), (2, 1));
        assert!(serde_json::from_str::<Coord>(r#"{"row":5,"col":1}"#).is_err());
    }
}
