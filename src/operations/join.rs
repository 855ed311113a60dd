use crate::topology::Facet;

/// Joins two coplanar facets along a shared edge.
///
/// The facets must have equal normals and `first` must contain an edge
/// `p -> q` that `second` traverses as `q -> p`, which is how two
/// consistently wound neighbours meet. The merged polygon walks `first` from
/// `q` back round to `p`, then `second` from `p` back round to `q`. Only the
/// first matching edge pair is used.
#[must_use]
pub fn join(first: &Facet, second: &Facet) -> Option<Facet> {
    if first.normal != second.normal {
        return None;
    }

    let (a, b) = (&first.vertices, &second.vertices);
    let (n, m) = (a.len(), b.len());
    for i0 in 0..n {
        let i1 = (i0 + 1) % n;
        for j0 in 0..m {
            let j1 = (j0 + 1) % m;
            if a[i0] == b[j1] && a[i1] == b[j0] {
                let mut vertices = Vec::with_capacity(n + m - 2);
                vertices.extend((0..n - 1).map(|k| a[(i1 + k) % n]));
                vertices.extend((0..m - 1).map(|k| b[(j1 + k) % m]));
                return Some(Facet::from_parts(first.normal, vertices));
            }
        }
    }
    None
}
