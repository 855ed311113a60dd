//! Algorithms over facets: ear-clipping triangulation, edge joining,
//! polygon cleanup and the planar merge loop.

pub mod join;
pub mod merge;
pub mod simplify;
pub mod triangulate;
