use std::collections::BTreeMap;

use crate::math::Vector3d;
use crate::topology::Facet;

/// Facet indices grouped by exact normal.
///
/// Facets can only join when their normals are equal, so pairs from
/// different buckets never need to be tried. Indices in a bucket ascend,
/// which keeps the pair order of a plain `(i, j)` scan.
fn normal_buckets(facets: &[Facet]) -> BTreeMap<Option<Vector3d>, Vec<usize>> {
    let mut buckets: BTreeMap<Option<Vector3d>, Vec<usize>> = BTreeMap::new();
    for (i, facet) in facets.iter().enumerate() {
        buckets.entry(facet.normal).or_default().push(i);
    }
    buckets
}

/// First `(i, j)` pair, in row-major order, whose facets join.
fn find_join(facets: &[Facet]) -> Option<(usize, usize, Facet)> {
    let buckets = normal_buckets(facets);
    facets.iter().enumerate().find_map(|(i, facet)| {
        buckets.get(&facet.normal)?.iter().find_map(|&j| {
            if i == j {
                return None;
            }
            facet.join(&facets[j]).map(|joined| (i, j, joined))
        })
    })
}

/// Merges the first pair of facets that share an edge and a normal.
///
/// Both facets are removed and the merged polygon, stripped of any spikes,
/// is appended to the end of the list. Returns a copy of the merged facet,
/// or `None` when no pair can be joined.
pub fn remove_planar_edge(facets: &mut Vec<Facet>) -> Option<Facet> {
    let (i, j, mut joined) = find_join(facets)?;
    tracing::debug!(first = i, second = j, vertices = joined.vertices.len(), "joining coplanar facets");

    facets.remove(i.max(j));
    facets.remove(i.min(j));
    while joined.remove_1d_vertex().is_some() {}

    facets.push(joined.clone());
    Some(joined)
}

/// Repeats [`remove_planar_edge`] until no pair can be joined.
///
/// Returns the number of merges performed.
pub fn remove_planar_edges(facets: &mut Vec<Facet>) -> usize {
    let before = facets.len();
    let mut count = 0;
    while remove_planar_edge(facets).is_some() {
        count += 1;
    }
    tracing::info!(merges = count, before, after = facets.len(), "removed planar edges");
    count
}

/// Removes colinear vertices from every facet until none remain.
///
/// Returns the number of vertices removed.
pub fn remove_colinear_vertices(facets: &mut [Facet]) -> usize {
    facets
        .iter_mut()
        .map(|facet| std::iter::from_fn(|| facet.remove_colinear_vertex()).count())
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tri(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Facet {
        Facet::new(None, [[a[0], a[1], 0.0], [b[0], b[1], 0.0], [c[0], c[1], 0.0]])
    }

    #[test]
    fn two_triangles_become_a_quad() {
        let mut facets = vec![
            tri([0.0, 0.0], [1.0, 0.0], [1.0, 1.0]),
            tri([0.0, 0.0], [1.0, 1.0], [0.0, 1.0]),
        ];
        let merged = remove_planar_edge(&mut facets).unwrap();
        assert_eq!(merged.vertices.len(), 4);
        assert_eq!(facets, vec![merged]);
        assert!(remove_planar_edge(&mut facets).is_none());
    }

    #[test]
    fn fan_around_centre_collapses_to_square() {
        let c = [1.0, 1.0];
        let mut facets = vec![
            tri([0.0, 0.0], [2.0, 0.0], c),
            tri([2.0, 0.0], [2.0, 2.0], c),
            tri([2.0, 2.0], [0.0, 2.0], c),
            tri([0.0, 2.0], [0.0, 0.0], c),
        ];
        assert_eq!(remove_planar_edges(&mut facets), 3);
        assert_eq!(facets.len(), 1);

        let mut square = facets.remove(0);
        square.sort_vertices();
        assert_eq!(
            square,
            Facet::new(
                None,
                [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 0.0], [0.0, 2.0, 0.0]],
            )
        );
    }

    #[test]
    fn merged_facet_goes_last() {
        let mut facets = vec![
            tri([5.0, 5.0], [6.0, 5.0], [5.0, 6.0]),
            tri([0.0, 0.0], [1.0, 0.0], [1.0, 1.0]),
            Facet::new(None, [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]),
            tri([0.0, 0.0], [1.0, 1.0], [0.0, 1.0]),
        ];
        let untouched = (facets[0].clone(), facets[2].clone());
        let merged = remove_planar_edge(&mut facets).unwrap();
        assert_eq!(facets.len(), 3);
        assert_eq!(facets[0], untouched.0);
        assert_eq!(facets[1], untouched.1);
        assert_eq!(facets[2], merged);
    }

    #[test]
    fn nothing_to_merge() {
        let mut facets = vec![
            tri([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]),
            Facet::new(None, [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]),
        ];
        let before = facets.clone();
        assert_eq!(remove_planar_edges(&mut facets), 0);
        assert_eq!(facets, before);
    }

    #[test]
    fn strips_colinear_vertices() {
        let mut facets = vec![
            Facet::new(
                None,
                [
                    [0.0, 0.0, 0.0],
                    [1.0, 0.0, 0.0],
                    [2.0, 0.0, 0.0],
                    [2.0, 1.0, 0.0],
                    [2.0, 2.0, 0.0],
                    [0.0, 2.0, 0.0],
                ],
            ),
            tri([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]),
        ];
        assert_eq!(remove_colinear_vertices(&mut facets), 2);
        assert_eq!(facets[0].vertices.len(), 4);
        assert_eq!(facets[1].vertices.len(), 3);
    }
}
