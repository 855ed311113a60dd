pub mod facet;
pub mod solid;
pub mod triangle;

pub use facet::Facet;
pub use solid::Solid;
pub use triangle::Triangle;
