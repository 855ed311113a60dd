use std::cmp::Ordering;

use crate::error::{GeometryError, Result};
use crate::math::polygon_3d::corner_normal;
use crate::math::Vector3d;
use crate::operations::{join, simplify, triangulate};

use super::Triangle;

/// A planar polygon bounding part of a solid's surface.
///
/// Facets start out as triangles when read from a file and may grow into
/// larger polygons when coplanar neighbours are joined. The vertices wind
/// counter-clockwise around `normal` (right-hand rule).
#[derive(Debug, Clone, Default)]
pub struct Facet {
    /// Unit normal, or `None` when the leading vertices are colinear.
    pub normal: Option<Vector3d>,
    /// Polygon corners in winding order. At least three for a valid facet.
    pub vertices: Vec<Vector3d>,
    /// Raw attribute bytes of a binary STL record.
    ///
    /// Only populated when reading binary files, and never written back:
    /// round-tripping a file drops whatever non-standard data was stored
    /// here.
    pub attributes: Option<Vec<u8>>,
}

impl Facet {
    /// Creates a facet from a normal and its vertices.
    ///
    /// When `normal` is `None` it is recalculated from the vertices.
    #[must_use]
    pub fn new<I, V>(normal: Option<Vector3d>, vertices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Vector3d>,
    {
        let mut facet = Self::from_parts(normal, vertices.into_iter().map(Into::into).collect());
        if facet.normal.is_none() {
            facet.recalculate_normal();
        }
        facet
    }

    /// Creates a facet keeping `normal` exactly as given, even when absent.
    #[must_use]
    pub fn from_parts(normal: Option<Vector3d>, vertices: Vec<Vector3d>) -> Self {
        Self {
            normal,
            vertices,
            attributes: None,
        }
    }

    /// Attaches raw binary attribute bytes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<u8>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Returns `true` if the facet has exactly three vertices.
    #[must_use]
    pub fn is_triangle(&self) -> bool {
        self.vertices.len() == 3
    }

    /// Returns the triangle view of this facet.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotATriangle` unless the facet has exactly
    /// three vertices.
    pub fn as_triangle(&self) -> Result<Triangle<'_>> {
        <&[Vector3d; 3]>::try_from(self.vertices.as_slice())
            .map(Triangle::new)
            .map_err(|_| {
                GeometryError::NotATriangle {
                    vertices: self.vertices.len(),
                }
                .into()
            })
    }

    /// Iterates over the vertices in winding order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vector3d> {
        self.vertices.iter()
    }

    /// Surface area, summed over the triangles of [`Self::split_to_triangles`].
    ///
    /// Never negative; zero for fully degenerate facets.
    #[must_use]
    pub fn area(&self) -> f64 {
        let triangles = self.split_to_triangles().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to fan triangulation for area");
            triangulate::fan(self)
        });
        triangles
            .iter()
            .filter_map(|t| t.as_triangle().ok())
            .map(|t| t.area())
            .sum()
    }

    /// Rotates the vertices so the smallest one comes first.
    ///
    /// Winding order is preserved, so facets describing the same polygon from
    /// different starting corners compare equal afterwards.
    pub fn sort_vertices(&mut self) {
        let start = self
            .vertices
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map_or(0, |(i, _)| i);
        self.vertices.rotate_left(start);
    }

    /// Recomputes the normal from the first three vertices.
    ///
    /// Uses `(v1 - v0) × (v2 - v1)`; the normal becomes `None` when those
    /// vertices are colinear or coincident.
    pub fn recalculate_normal(&mut self) {
        self.normal = match self.vertices.as_slice() {
            [v0, v1, v2, ..] => corner_normal(v0, v1, v2),
            _ => None,
        };
    }

    /// Splits the polygon into `n - 2` triangles by ear clipping.
    ///
    /// Every triangle carries this facet's normal.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NoEar` if the polygon is not simple and no ear
    /// can be clipped.
    pub fn split_to_triangles(&self) -> Result<Vec<Facet>> {
        triangulate::split_to_triangles(self)
    }

    /// Removes a spike `p, q, p` left behind by a join.
    ///
    /// Drops the tip `q` and the duplicated `p`, returning `q`. Returns `None`
    /// if there is no spike or removing it would leave fewer than three
    /// vertices.
    pub fn remove_1d_vertex(&mut self) -> Option<Vector3d> {
        simplify::remove_1d_vertex(&mut self.vertices)
    }

    /// Removes the middle vertex of the first colinear run of three.
    ///
    /// Returns the removed vertex, or `None` if no such vertex exists or the
    /// facet is already a triangle.
    pub fn remove_colinear_vertex(&mut self) -> Option<Vector3d> {
        simplify::remove_colinear_vertex(&mut self.vertices)
    }

    /// Joins two facets sharing an edge traversed in opposite directions.
    ///
    /// Returns `None` if the normals differ or no such edge exists.
    #[must_use]
    pub fn join(&self, other: &Facet) -> Option<Facet> {
        join::join(self, other)
    }
}

impl PartialEq for Facet {
    fn eq(&self, other: &Self) -> bool {
        self.normal == other.normal && self.vertices == other.vertices
    }
}

impl Eq for Facet {}

impl PartialOrd for Facet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Facet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.vertices
            .cmp(&other.vertices)
            .then_with(|| self.normal.cmp(&other.normal))
    }
}

impl<'a> IntoIterator for &'a Facet {
    type Item = &'a Vector3d;
    type IntoIter = std::slice::Iter<'a, Vector3d>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}
