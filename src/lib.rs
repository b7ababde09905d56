pub mod error;
pub mod hull;
pub mod math;
pub mod triangulation;
pub mod zone;

pub use error::{ConfigurationError, DegenerateInputError, Result, ZonemeshError};
pub use triangulation::{Perturbation, Triangle, Triangulate, Triangulation, TriangulationConfig};
pub use zone::{ZoneBuilder, ZoneMesh};
