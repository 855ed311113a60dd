use crate::math::polygon_3d::corner_normal;
use crate::math::Vector3d;

/// Removes the first spike `p, q, p` from a closed vertex loop.
///
/// Joining two facets that share more than one consecutive edge leaves the
/// polygon doubling back on itself. The tip `q` and the repeated `p` are
/// removed (higher index first, so the lower index stays valid) and `q` is
/// returned. Loops that would drop below three vertices are left alone.
pub fn remove_1d_vertex(vertices: &mut Vec<Vector3d>) -> Option<Vector3d> {
    let n = vertices.len();
    if n < 5 {
        return None;
    }
    let i = (0..n).find(|&i| vertices[i] == vertices[(i + 2) % n])?;
    let tip = (i + 1) % n;
    let repeat = (i + 2) % n;

    if tip > repeat {
        let removed = vertices.remove(tip);
        vertices.remove(repeat);
        Some(removed)
    } else {
        vertices.remove(repeat);
        Some(vertices.remove(tip))
    }
}

/// Removes the middle vertex of the first colinear corner in a vertex loop.
///
/// A corner is colinear when its computed normal is absent. Triangles are
/// left alone.
pub fn remove_colinear_vertex(vertices: &mut Vec<Vector3d>) -> Option<Vector3d> {
    let n = vertices.len();
    if n < 4 {
        return None;
    }
    let i = (0..n).find(|&i| {
        corner_normal(&vertices[i], &vertices[(i + 1) % n], &vertices[(i + 2) % n]).is_none()
    })?;
    Some(vertices.remove((i + 1) % n))
}
