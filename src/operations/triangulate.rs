use crate::error::{GeometryError, Result};
use crate::math::polygon_3d::{newell_normal, orientation};
use crate::math::{Vector3, Vector3d};
use crate::topology::Facet;

/// Splits a polygon facet into `n - 2` triangles by ear clipping.
///
/// Ears are searched in vertex order. A candidate `(a, b, c)` taken from
/// three consecutive corners is clipped when it winds the same way as the
/// facet and no other remaining corner lies strictly inside it. After each
/// clip the scan restarts from the first corner. Every triangle carries the
/// facet's own normal.
///
/// The winding reference is the facet normal, or the Newell normal when the
/// facet has none. Polygons with zero area have no winding at all and are
/// split as a fan.
///
/// # Errors
///
/// Returns `GeometryError::NoEar` if a full scan finds no ear, which only
/// happens for self-intersecting polygons or polygons wound against their
/// normal.
pub fn split_to_triangles(facet: &Facet) -> Result<Vec<Facet>> {
    let n = facet.vertices.len();
    if n <= 3 {
        return Ok(vec![Facet::from_parts(facet.normal, facet.vertices.clone())]);
    }

    let Some(reference) = facet
        .normal
        .map(|normal| normal.to_vector())
        .or_else(|| newell_normal(&facet.vertices))
    else {
        return Ok(fan(facet));
    };

    let mut working = facet.vertices.clone();
    let mut triangles = Vec::with_capacity(n - 2);
    while working.len() > 3 {
        let m = working.len();
        let ear = find_ear(&working, &reference).ok_or(GeometryError::NoEar { vertices: n })?;
        let tip = (ear + 1) % m;
        triangles.push(Facet::from_parts(
            facet.normal,
            vec![working[ear], working[tip], working[(ear + 2) % m]],
        ));
        working.remove(tip);
    }
    triangles.push(Facet::from_parts(facet.normal, working));

    Ok(triangles)
}

/// Fan decomposition around the first vertex, without any validity checks.
#[must_use]
pub fn fan(facet: &Facet) -> Vec<Facet> {
    let Some((first, rest)) = facet.vertices.split_first() else {
        return Vec::new();
    };
    rest.windows(2)
        .map(|pair| Facet::from_parts(facet.normal, vec![*first, pair[0], pair[1]]))
        .collect()
}

/// Index of the first corner starting a clippable ear, if any.
fn find_ear(working: &[Vector3d], reference: &Vector3) -> Option<usize> {
    let m = working.len();
    (0..m).find(|&i| {
        let corners = [i, (i + 1) % m, (i + 2) % m];
        let [a, b, c] = corners.map(|k| &working[k]);
        if orientation(a, b, c, reference) <= 0.0 {
            return false;
        }
        !working
            .iter()
            .enumerate()
            .filter(|(k, _)| !corners.contains(k))
            .any(|(_, p)| strictly_inside(p, a, b, c, reference))
    })
}

/// `true` when `p` is on the inner side of all three edges of `a, b, c`.
///
/// Points on an edge or a corner are not inside.
fn strictly_inside(p: &Vector3d, a: &Vector3d, b: &Vector3d, c: &Vector3d, reference: &Vector3) -> bool {
    orientation(a, b, p, reference) > 0.0
        && orientation(b, c, p, reference) > 0.0
        && orientation(c, a, p, reference) > 0.0
}
