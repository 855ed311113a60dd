use super::{Vector3, Vector3d};

/// Unit normal of the corner `a -> b -> c`, computed as `(b - a) × (c - b)`.
///
/// Returns `None` if the cross product has zero magnitude (colinear or
/// coincident points).
#[must_use]
pub fn corner_normal(a: &Vector3d, b: &Vector3d, c: &Vector3d) -> Option<Vector3d> {
    corner_cross(a, b, c).try_normalize(0.0).map(Vector3d::from)
}

/// Unnormalized cross product `(b - a) × (c - b)`.
#[must_use]
pub fn corner_cross(a: &Vector3d, b: &Vector3d, c: &Vector3d) -> Vector3 {
    let (a, b, c) = (a.to_vector(), b.to_vector(), c.to_vector());
    (b - a).cross(&(c - b))
}

/// Signed orientation of the corner `a -> b -> c` relative to `normal`.
///
/// Positive when the corner winds counter-clockwise seen from the tip of
/// `normal`, negative when clockwise, zero when colinear.
#[must_use]
pub fn orientation(a: &Vector3d, b: &Vector3d, c: &Vector3d, normal: &Vector3) -> f64 {
    corner_cross(a, b, c).dot(normal)
}

/// Polygon normal by Newell's method.
///
/// Robust against colinear leading vertices. Returns `None` for polygons
/// with zero area.
#[must_use]
pub fn newell_normal(points: &[Vector3d]) -> Option<Vector3> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let mut sum = Vector3::zeros();
    for i in 0..n {
        let p = points[i].to_vector();
        let q = points[(i + 1) % n].to_vector();
        sum.x += (p.y - q.y) * (p.z + q.z);
        sum.y += (p.z - q.z) * (p.x + q.x);
        sum.z += (p.x - q.x) * (p.y + q.y);
    }
    sum.try_normalize(0.0)
}

/// Triangle area from its three side lengths (Heron's formula).
///
/// The radicand is clamped at zero so rounding on degenerate triangles never
/// yields NaN.
#[must_use]
pub fn heron_area(a: f64, b: f64, c: f64) -> f64 {
    let p = (a + b + c) / 2.0;
    (p * (p - a) * (p - b) * (p - c)).max(0.0).sqrt()
}
