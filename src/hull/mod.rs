//! Lower convex hull of points lifted onto the paraboloid `z = x² + y²`.

pub mod facet;
mod lower_hull;

pub use facet::{Facet, FacetId, Node};
pub use lower_hull::{seed_triangle, LowerHull};
