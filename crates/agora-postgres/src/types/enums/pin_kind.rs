//! Geometry kind enumeration for map feedback.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Geometry of a map-anchored feedback item.
///
/// Corresponds to the `PIN_KIND` PostgreSQL enum. The coordinate payload is
/// stored as JSONB; the kind decides how many coordinate pairs are valid:
/// a point has exactly one, a line at least two, a polygon at least three
/// (the closing edge is implicit).
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::PinKind"]
pub enum PinKind {
    /// A single map location
    #[db_rename = "point"]
    #[serde(rename = "point")]
    #[default]
    Point,

    /// An open polyline (e.g. a route or desire line)
    #[db_rename = "line"]
    #[serde(rename = "line")]
    Line,

    /// A closed area
    #[db_rename = "polygon"]
    #[serde(rename = "polygon")]
    Polygon,
}

impl PinKind {
    /// Minimum number of coordinate pairs a geometry of this kind must carry.
    #[inline]
    pub fn min_coordinates(self) -> usize {
        match self {
            PinKind::Point => 1,
            PinKind::Line => 2,
            PinKind::Polygon => 3,
        }
    }

    /// Maximum number of coordinate pairs a geometry of this kind may carry.
    #[inline]
    pub fn max_coordinates(self) -> usize {
        match self {
            PinKind::Point => 1,
            // Bounded to keep payloads reasonable for hand-drawn shapes
            PinKind::Line | PinKind::Polygon => 512,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert_eq!(PinKind::Point.min_coordinates(), 1);
        assert_eq!(PinKind::Point.max_coordinates(), 1);
        assert_eq!(PinKind::Line.min_coordinates(), 2);
        assert_eq!(PinKind::Polygon.min_coordinates(), 3);
    }
}
