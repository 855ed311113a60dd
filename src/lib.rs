//! Reading, writing and simplifying STL triangle meshes.
//!
//! A [`Solid`] is a named list of [`Facet`]s. Facets decoded from a file are
//! triangles; [`Solid::remove_planar_edges`] merges coplanar neighbours into
//! larger polygons and [`Facet::split_to_triangles`] splits them back.
//!
//! ```
//! use solidstl::{decode_text, encode_binary, Solid};
//!
//! let src = "solid demo
//!   facet normal 0 0 1
//!     outer loop
//!       vertex 0 0 0
//!       vertex 1 0 0
//!       vertex 0 1 0
//!     endloop
//!   endfacet
//! endsolid demo
//! ";
//! let solid: Solid = decode_text(src.as_bytes()).unwrap();
//! assert_eq!(solid.name.as_deref(), Some("demo"));
//!
//! let mut bytes = Vec::new();
//! encode_binary(&solid, &mut bytes).unwrap();
//! assert_eq!(bytes.len(), 84 + 50);
//! ```

pub mod error;
pub mod io;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{EncodeError, FormatError, GeometryError, Result, StlError, SyntaxError};
pub use io::{
    decode_binary, decode_binary_with, decode_text, encode_binary, encode_binary_with, encode_text,
    encode_text_with, PolygonPolicy, ReadParams, WriteParams,
};
pub use math::Vector3d;
pub use topology::{Facet, Solid, Triangle};
