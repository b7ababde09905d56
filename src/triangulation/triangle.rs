use std::sync::OnceLock;

use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Matrix3, Point2};

/// One facet of a [`Triangulation`](super::Triangulation).
///
/// Holds indices into the triangulation's vertex list together with copies of
/// the three corner positions. The circumcenter and centroid are computed on
/// first request and cached for the lifetime of the triangle.
#[derive(Debug, Clone)]
pub struct Triangle {
    indices: [usize; 3],
    corners: [Point2; 3],
    circumcenter: OnceLock<Point2>,
    centroid: OnceLock<Point2>,
}

impl Triangle {
    /// Creates a triangle from vertex indices and the matching positions.
    #[must_use]
    pub fn new(indices: [usize; 3], corners: [Point2; 3]) -> Self {
        Self {
            indices,
            corners,
            circumcenter: OnceLock::new(),
            centroid: OnceLock::new(),
        }
    }

    /// Returns the indices of the three corners in the vertex list.
    #[must_use]
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// Returns the three corner positions.
    #[must_use]
    pub fn corners(&self) -> &[Point2; 3] {
        &self.corners
    }

    /// Signed area; positive for counter-clockwise corners.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.corners)
    }

    /// Center of the circle through the three corners.
    ///
    /// Not finite when the corners are (nearly) collinear; check with
    /// `is_finite` and fall back to [`centroid`](Self::centroid).
    #[must_use]
    pub fn circumcenter(&self) -> Point2 {
        *self.circumcenter.get_or_init(|| circumcenter(&self.corners))
    }

    /// Arithmetic mean of the three corners.
    #[must_use]
    pub fn centroid(&self) -> Point2 {
        *self.centroid.get_or_init(|| centroid(&self.corners))
    }
}

/// Circumcenter by the determinant method.
///
/// With `M` the matrix of rows `(x, y, 1)`, `a = det M`; replacing the first
/// column by `x² + y²` gives `dx = -det`, and the rows `(x² + y², x, 1)` give
/// `dy = det`. The center is `(dx, dy) * (-1 / 2a)`.
#[must_use]
pub fn circumcenter(corners: &[Point2; 3]) -> Point2 {
    let [p0, p1, p2] = corners;
    let (s0, s1, s2) = (
        p0.coords.norm_squared(),
        p1.coords.norm_squared(),
        p2.coords.norm_squared(),
    );

    #[rustfmt::skip]
    let a = Matrix3::new(
        p0.x, p0.y, 1.0,
        p1.x, p1.y, 1.0,
        p2.x, p2.y, 1.0,
    )
    .determinant();

    #[rustfmt::skip]
    let dx = -Matrix3::new(
        s0, p0.y, 1.0,
        s1, p1.y, 1.0,
        s2, p2.y, 1.0,
    )
    .determinant();

    #[rustfmt::skip]
    let dy = Matrix3::new(
        s0, p0.x, 1.0,
        s1, p1.x, 1.0,
        s2, p2.x, 1.0,
    )
    .determinant();

    let s = -1.0 / (2.0 * a);
    Point2::new(s * dx, s * dy)
}

/// Componentwise mean of the three corners.
#[must_use]
pub fn centroid(corners: &[Point2; 3]) -> Point2 {
    let [p0, p1, p2] = corners;
    Point2::from((p0.coords + p1.coords + p2.coords) / 3.0)
}
