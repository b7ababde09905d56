//! Planar predicates and the paraboloid lift.
//!
//! All predicates work on plain `f64` coordinates and report a signed value.
//! Exact zero means "on the line" (or circle); callers that need slack compare
//! against their own tolerance.

use super::{Matrix3, Point2, Point3};

/// Twice the signed area of triangle `abc`.
///
/// Positive when `a -> b -> c` turns counter-clockwise, negative when it turns
/// clockwise, zero when the three points are collinear.
#[must_use]
pub fn orient_2d(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Signed distance from `p` to the line through `a` and `b`.
///
/// Positive on the left of `a -> b`. Returns `0.0` when `a == b`, so a
/// degenerate line counts as passing through every point.
#[must_use]
pub fn line_distance(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    let len = (b - a).norm();
    if len == 0.0 {
        return 0.0;
    }
    orient_2d(a, b, p) / len
}

/// Returns `true` if the orthogonal projection of `p` onto segment `ab` falls
/// strictly between its endpoints.
#[must_use]
pub fn projects_within_segment(a: &Point2, b: &Point2, p: &Point2) -> bool {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq == 0.0 {
        return false;
    }
    let t = (p - a).dot(&d) / len_sq;
    t > 0.0 && t < 1.0
}

/// Lifts a planar point onto the paraboloid `z = x² + y²`.
///
/// A point lies inside the circumcircle of a triangle exactly when its lift
/// lies below the plane through the lifted triangle corners.
#[must_use]
pub fn lift(p: &Point2) -> Point3 {
    Point3::new(p.x, p.y, p.x * p.x + p.y * p.y)
}

/// In-circle test for counter-clockwise `abc`.
///
/// Positive when `p` lies strictly inside the circumcircle of `abc`, negative
/// outside, zero on it. Geometrically this is the height of the lifted `p`
/// below the plane through the lifted corners, up to a positive factor. The
/// corners are lifted relative to `p`, which keeps the paraboloid heights as
/// small as the triangle itself wherever it sits in the plane.
#[must_use]
pub fn in_circle(a: &Point2, b: &Point2, c: &Point2, p: &Point2) -> f64 {
    let [la, lb, lc] = [a, b, c].map(|q| lift(&Point2::from(q - p)));
    Matrix3::new(
        la.x, la.y, la.z,
        lb.x, lb.y, lb.z,
        lc.x, lc.y, lc.z,
    )
    .determinant()
}
