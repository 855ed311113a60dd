use crate::math::polygon_3d::heron_area;
use crate::math::Vector3d;

/// Read-only view of a facet that has exactly three vertices.
///
/// Side `a` joins vertices 0 and 1, `b` joins 0 and 2, `c` joins 1 and 2.
/// Obtained through
/// [`Facet::as_triangle`](super::Facet::as_triangle).
#[derive(Debug, Clone, Copy)]
pub struct Triangle<'a> {
    vertices: &'a [Vector3d; 3],
}

impl<'a> Triangle<'a> {
    pub(crate) fn new(vertices: &'a [Vector3d; 3]) -> Self {
        Self { vertices }
    }

    /// The three vertices in winding order.
    #[must_use]
    pub fn vertices(&self) -> &'a [Vector3d; 3] {
        self.vertices
    }

    /// Length of the side between vertices 0 and 1.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.vertices[0].distance(&self.vertices[1])
    }

    /// Length of the side between vertices 0 and 2.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.vertices[0].distance(&self.vertices[2])
    }

    /// Length of the side between vertices 1 and 2.
    #[must_use]
    pub fn c(&self) -> f64 {
        self.vertices[1].distance(&self.vertices[2])
    }

    /// Sum of the three side lengths.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.a() + self.b() + self.c()
    }

    /// Area by Heron's formula; zero for degenerate triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        heron_area(self.a(), self.b(), self.c())
    }
}
