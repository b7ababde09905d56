use crate::error::{DegenerateInputError, Result};
use crate::math::{Point2, Point3};
use crate::triangulation::{Triangulate, TriangulationConfig};

use super::mesh::{ZoneMesh, ZONE_ELEVATION};

/// Collects clicked ground points and turns them into a [`ZoneMesh`].
///
/// Points are world positions with Y up; only their horizontal `(x, z)`
/// coordinates take part in the triangulation.
#[derive(Debug, Clone)]
pub struct ZoneBuilder {
    points: Vec<Point3>,
    config: TriangulationConfig,
    elevation: f64,
}

impl Default for ZoneBuilder {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            config: TriangulationConfig::default(),
            elevation: ZONE_ELEVATION,
        }
    }
}

impl ZoneBuilder {
    /// Creates an empty builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the triangulation configuration.
    #[must_use]
    pub fn with_config(mut self, config: TriangulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the height at which the finished mesh is placed.
    #[must_use]
    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    /// Records a clicked point and returns the number of points so far.
    pub fn add_point(&mut self, point: Point3) -> usize {
        self.points.push(point);
        tracing::debug!(
            n = self.points.len(),
            x = point.x,
            y = point.y,
            z = point.z,
            "added point to zone"
        );
        self.points.len()
    }

    /// Points recorded so far, in click order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of points recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Discards all recorded points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Triangulates the recorded points into a mesh.
    ///
    /// The recorded points are consumed whether or not this succeeds, so the
    /// builder is ready for the next zone.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateInputError::TooFewPoints`] for fewer than three
    /// points, or any error from [`Triangulate::execute`].
    pub fn finalize(&mut self) -> Result<ZoneMesh> {
        let points = std::mem::take(&mut self.points);
        tracing::info!(points = points.len(), "finalizing zone");

        if points.len() < 3 {
            tracing::warn!(points = points.len(), "not creating zone (need >= 3 points)");
            return Err(DegenerateInputError::TooFewPoints {
                count: points.len(),
            }
            .into());
        }

        let ground: Vec<Point2> = points.iter().map(|p| Point2::new(p.x, p.z)).collect();
        let triangulation = Triangulate::new(&ground)
            .with_config(self.config)
            .execute()
            .inspect_err(|err| tracing::warn!(%err, "zone triangulation failed"))?;

        Ok(ZoneMesh::from_triangulation(&triangulation, self.elevation))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ZonemeshError;
    use crate::math::TOLERANCE;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn add_point_counts() {
        let mut builder = ZoneBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.add_point(p(0.0, 0.0, 0.0)), 1);
        assert_eq!(builder.add_point(p(1.0, 0.0, 0.0)), 2);
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.points()[1], p(1.0, 0.0, 0.0));

        builder.clear();
        assert!(builder.is_empty());
    }

    #[test]
    fn too_few_points() {
        let mut builder = ZoneBuilder::new();
        builder.add_point(p(0.0, 0.0, 0.0));
        builder.add_point(p(1.0, 0.0, 0.0));
        let err = builder.finalize().unwrap_err();
        assert!(matches!(
            err,
            ZonemeshError::Degenerate(DegenerateInputError::TooFewPoints { count: 2 })
        ));
        assert!(builder.is_empty());
    }

    #[test]
    fn uses_horizontal_coordinates() {
        let mut builder = ZoneBuilder::new().with_elevation(0.25);
        // Heights vary but the footprint is a 4 x 2 rectangle in (x, z).
        builder.add_point(p(0.0, 1.0, 0.0));
        builder.add_point(p(4.0, 3.0, 0.0));
        builder.add_point(p(4.0, -2.0, 2.0));
        builder.add_point(p(0.0, 0.5, 2.0));

        let mesh = builder.finalize().unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert!((mesh.area() - 8.0).abs() < 1e-9);
        for v in &mesh.vertices {
            assert!((v.y - 0.25).abs() < TOLERANCE);
        }

        let centroid = mesh.centroid().unwrap();
        assert!((centroid.x - 2.0).abs() < TOLERANCE);
        assert!((centroid.z - 1.0).abs() < TOLERANCE);
        assert!(builder.is_empty());
    }

    #[test]
    fn default_elevation_lifts_zone() {
        let mut builder = ZoneBuilder::new();
        builder.add_point(p(0.0, 0.0, 0.0));
        builder.add_point(p(1.0, 0.0, 0.0));
        builder.add_point(p(0.0, 0.0, 1.0));
        let mesh = builder.finalize().unwrap();
        assert!(mesh.vertices.iter().all(|v| (v.y - ZONE_ELEVATION).abs() < TOLERANCE));
    }

    #[test]
    fn finalize_uses_the_builder_config() {
        let config = TriangulationConfig::default()
            .with_perturbation(crate::triangulation::Perturbation::random_shift(1e-4));
        let mut builder = ZoneBuilder::new().with_config(config);
        builder.add_point(p(0.0, 0.0, 0.0));
        builder.add_point(p(1.0, 0.0, 0.0));
        builder.add_point(p(0.0, 0.0, 1.0));
        let err = builder.finalize().unwrap_err();
        assert!(matches!(err, ZonemeshError::Configuration(_)));
        assert!(builder.is_empty());
    }

    #[test]
    fn collinear_clicks_fail() {
        let mut builder = ZoneBuilder::new();
        for i in 0..4 {
            builder.add_point(p(f64::from(i), 0.0, f64::from(i) * 2.0));
        }
        let err = builder.finalize().unwrap_err();
        assert!(matches!(
            err,
            ZonemeshError::Degenerate(DegenerateInputError::Collinear { .. })
        ));
    }
}
