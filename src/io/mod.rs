//! STL readers and writers.
//!
//! Both formats carry only triangles. Writers therefore need a policy for
//! facets that grew into polygons through [`Solid::remove_planar_edges`]:
//! reject them (the default) or triangulate them on the way out.

mod binary;
mod lexer;
mod text;

pub use binary::{decode_binary, decode_binary_with, encode_binary, encode_binary_with};
pub use text::{decode_text, encode_text, encode_text_with};

use std::borrow::Cow;

use crate::error::{EncodeError, Result};
use crate::topology::{Facet, Solid};

/// Parameters controlling how STL data is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadParams {
    /// Accept bytes after the last binary triangle record instead of failing.
    pub allow_trailing_bytes: bool,
}

/// What writers do with facets that have more than three vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolygonPolicy {
    /// Fail with `EncodeError::NonTriangularFacet` before writing anything.
    #[default]
    Reject,
    /// Split polygons with [`Facet::split_to_triangles`] first.
    ///
    /// Facets with fewer than three vertices are still rejected.
    Triangulate,
}

/// Parameters controlling how STL data is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteParams {
    /// Handling of non-triangular facets.
    pub polygons: PolygonPolicy,
    /// Digits after the decimal point in text output.
    ///
    /// `None` writes the shortest representation that reads back exactly.
    pub precision: Option<usize>,
}

impl WriteParams {
    /// Returns the facets to write, all guaranteed to be triangles.
    ///
    /// Facets with fewer than three vertices cannot be triangulated and are
    /// rejected under either policy.
    fn triangles<'a>(&self, solid: &'a Solid) -> Result<Cow<'a, [Facet]>> {
        let rejected = |index: usize, facet: &Facet| EncodeError::NonTriangularFacet {
            index,
            vertices: facet.vertices.len(),
        };
        let Some(index) = solid.facets.iter().position(|f| !f.is_triangle()) else {
            return Ok(Cow::Borrowed(&solid.facets));
        };
        if self.polygons == PolygonPolicy::Reject {
            return Err(rejected(index, &solid.facets[index]).into());
        }

        let mut triangles = Vec::with_capacity(solid.facets.len());
        for (index, facet) in solid.facets.iter().enumerate() {
            match facet.vertices.len() {
                3 => triangles.push(facet.clone()),
                n if n < 3 => return Err(rejected(index, facet).into()),
                _ => triangles.extend(facet.split_to_triangles()?),
            }
        }
        tracing::debug!(
            facets = solid.facets.len(),
            triangles = triangles.len(),
            "triangulated polygons for writing"
        );
        Ok(Cow::Owned(triangles))
    }
}
