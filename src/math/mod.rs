pub mod polygon_3d;
pub mod vector3d;

pub use vector3d::Vector3d;

/// 3D vector type used for intermediate geometry.
pub type Vector3 = nalgebra::Vector3<f64>;
