//! Minimap zones: clicked ground points turned into a pickable surface.

mod builder;
mod mesh;

pub use builder::ZoneBuilder;
pub use mesh::{Aabb, ZoneMesh, ZONE_ELEVATION};
