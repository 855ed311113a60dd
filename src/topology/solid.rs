use std::io::Write;

use crate::error::Result;
use crate::io;
use crate::math::Vector3d;
use crate::operations::merge;

use super::Facet;

/// A named triangle mesh: the root element of an STL file.
///
/// The facet list is a plain container. Its order carries no meaning and no
/// adjacency between facets is stored; neighbours are discovered by matching
/// edges when merging.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solid {
    /// Name given to the object by the file, if any.
    pub name: Option<String>,
    /// Facets making up the exterior surface.
    pub facets: Vec<Facet>,
}

impl Solid {
    /// Creates a solid from a name and its facets.
    #[must_use]
    pub fn new(name: Option<String>, facets: Vec<Facet>) -> Self {
        Self { name, facets }
    }

    /// Appends a new facet, see [`Facet::new`].
    pub fn add_facet<I, V>(&mut self, normal: Option<Vector3d>, vertices: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Vector3d>,
    {
        self.facets.push(Facet::new(normal, vertices));
    }

    /// Sum of the areas of all facets.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.facets.iter().map(Facet::area).sum()
    }

    /// Canonicalizes vertex rotation in every facet, then sorts the facets.
    ///
    /// Two solids holding the same facets in any order compare equal after
    /// sorting, as long as winding and polygon decomposition match.
    pub fn sort_facets(&mut self) {
        for facet in &mut self.facets {
            facet.sort_vertices();
        }
        self.facets.sort();
    }

    /// Joins the first pair of coplanar facets sharing an edge.
    ///
    /// The merged facet replaces both and is appended at the end. Returns a
    /// copy of it, or `None` when nothing can be joined.
    pub fn remove_planar_edge(&mut self) -> Option<Facet> {
        merge::remove_planar_edge(&mut self.facets)
    }

    /// Joins coplanar neighbours until no more edges can be removed.
    ///
    /// Returns the number of merges. The surface is unchanged; only the
    /// facet count drops.
    pub fn remove_planar_edges(&mut self) -> usize {
        merge::remove_planar_edges(&mut self.facets)
    }

    /// Removes colinear vertices from every facet, returning how many.
    pub fn remove_colinear_vertices(&mut self) -> usize {
        merge::remove_colinear_vertices(&mut self.facets)
    }

    /// Replaces every polygon facet with its triangles.
    ///
    /// Returns the number of facets added.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NoEar` if a facet cannot be triangulated; the
    /// solid is left unchanged in that case.
    pub fn triangulate(&mut self) -> Result<usize> {
        let before = self.facets.len();
        let mut triangles = Vec::with_capacity(before);
        for facet in &self.facets {
            if facet.is_triangle() {
                triangles.push(facet.clone());
            } else {
                triangles.extend(facet.split_to_triangles()?);
            }
        }
        self.facets = triangles;
        Ok(self.facets.len() - before)
    }

    /// Writes this solid in binary STL format.
    ///
    /// # Errors
    ///
    /// Returns an error if a facet is not a triangle or the writer fails.
    pub fn write_binary<W: Write>(&self, writer: W) -> Result<()> {
        io::encode_binary(self, writer)
    }

    /// Writes this solid in text STL format.
    ///
    /// # Errors
    ///
    /// Returns an error if a facet is not a triangle or the writer fails.
    pub fn write_text<W: Write>(&self, writer: W) -> Result<()> {
        io::encode_text(self, writer)
    }

    /// Iterates over the facets.
    pub fn iter(&self) -> std::slice::Iter<'_, Facet> {
        self.facets.iter()
    }
}

impl<'a> IntoIterator for &'a Solid {
    type Item = &'a Facet;
    type IntoIter = std::slice::Iter<'a, Facet>;

    fn into_iter(self) -> Self::IntoIter {
        self.facets.iter()
    }
}
