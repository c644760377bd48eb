//! Planar coordinate type.
//!
//! Positions are plain Cartesian `(x, y)` pairs in kilometres.  Distances are
//! straight-line Euclidean; there is no road network behind proximity
//! dispatch.

/// A point on the dispatch plane, in kilometres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Cheaper than [`distance`](Self::distance)
    /// and ordered identically, so ranking code can compare on it directly.
    #[inline]
    pub fn distance_2(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance in kilometres.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// `[x, y]` array form, as used by spatial index entries.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
