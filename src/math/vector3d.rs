use std::cmp::Ordering;
use std::fmt;

use super::Vector3;

/// Three-dimensional vector used for both normals and vertices of a facet.
///
/// Equality is exact component-wise `f64` equality. Ordering is
/// lexicographic on `(x, y, z)`; coordinates are expected to be finite, NaN
/// falls back to [`f64::total_cmp`] so sorting never panics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3d {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector3d {
    /// Creates a new vector from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The X value, usually the left-right axis.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// The Y value, usually the in-out axis.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// The Z value, usually the up-down axis.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Returns the coordinates as an array in `(x, y, z)` order.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the equivalent `nalgebra` vector.
    #[must_use]
    pub fn to_vector(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Applies `f` to each coordinate and returns the resulting vector.
    #[must_use]
    pub fn map_coordinates<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }
}

fn cmp_coord(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

impl Eq for Vector3d {}

impl PartialOrd for Vector3d {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vector3d {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_coord(self.x, other.x)
            .then_with(|| cmp_coord(self.y, other.y))
            .then_with(|| cmp_coord(self.z, other.z))
    }
}

impl From<[f64; 3]> for Vector3d {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vector3d {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for Vector3d {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3d> for Vector3 {
    fn from(v: Vector3d) -> Self {
        v.to_vector()
    }
}

impl fmt::Display for Vector3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn sort_is_lexicographic() {
        let v1 = Vector3d::new(1.0, 2.0, 3.0);
        let v2 = Vector3d::new(4.0, 5.0, 6.0);
        let v3 = Vector3d::new(7.0, 8.0, 9.0);
        let perms = [
            [v1, v2, v3],
            [v1, v3, v2],
            [v2, v1, v3],
            [v2, v3, v1],
            [v3, v1, v2],
            [v3, v2, v1],
        ];
        for perm in perms {
            let mut sorted = perm.to_vec();
            sorted.sort();
            assert_eq!(sorted, vec![v1, v2, v3]);
        }
    }

    #[test]
    fn later_coordinates_break_ties() {
        let a = Vector3d::new(1.0, 2.0, 3.0);
        let b = Vector3d::new(1.0, 2.0, 4.0);
        let c = Vector3d::new(1.0, 3.0, 0.0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn signed_zero_is_equal() {
        assert_eq!(Vector3d::new(0.0, -0.0, 1.0), Vector3d::new(0.0, 0.0, 1.0));
        assert_eq!(
            Vector3d::new(-0.0, 0.0, 0.0).cmp(&Vector3d::new(0.0, 0.0, 0.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn map_coordinates_rounds() {
        let v = Vector3d::new(1.1, 2.1, 3.1);
        assert_eq!(v.map_coordinates(f64::round), Vector3d::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn nalgebra_conversion() {
        let v = Vector3d::new(1.0, -2.0, 3.5);
        let n: Vector3 = v.into();
        assert_eq!(Vector3d::from(n), v);
        assert_eq!(v.to_array(), [1.0, -2.0, 3.5]);
    }

    #[test]
    fn distance_between_points() {
        let a = Vector3d::new(0.0, 0.0, 0.0);
        let b = Vector3d::new(3.0, 4.0, 0.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }
}
