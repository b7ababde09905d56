pub mod polygon_2d;
pub mod predicates;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 matrix, used for the determinant formulas.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Tolerance for floating-point comparisons in tests.
#[cfg(test)]
pub(crate) const TOLERANCE: f64 = 1e-10;
