use crate::error::ConfigurationError;

/// Default plane distance tolerance for the hull construction.
pub const DEFAULT_PLANE_DISTANCE_TOLERANCE: f64 = 1e-5;

/// Default radius for [`Perturbation::RandomShift`].
pub const DEFAULT_PERTURBATION_RADIUS: f64 = 1e-6;

/// How input points are nudged before triangulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Perturbation {
    /// Points are used as given.
    None,
    /// Each point is shifted by an independent random offset of length at
    /// most `radius`, drawn from a generator seeded with `seed`.
    RandomShift { radius: f64, seed: u64 },
}

impl Perturbation {
    /// A random shift of at most `radius` with seed `0`.
    #[must_use]
    pub fn random_shift(radius: f64) -> Self {
        Self::RandomShift { radius, seed: 0 }
    }
}

impl Default for Perturbation {
    fn default() -> Self {
        Self::random_shift(DEFAULT_PERTURBATION_RADIUS)
    }
}

/// Parameters controlling triangulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangulationConfig {
    /// Distance below which the input counts as coincident (all points
    /// within it of one point) or collinear (all within it of one line). It
    /// also bounds how far the covered area may stray from the convex hull.
    pub plane_distance_tolerance: f64,
    /// Optional shift applied to the input points to break exact
    /// degeneracies.
    pub point_perturbation: Perturbation,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            plane_distance_tolerance: DEFAULT_PLANE_DISTANCE_TOLERANCE,
            point_perturbation: Perturbation::default(),
        }
    }
}

impl TriangulationConfig {
    /// Sets the plane distance tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.plane_distance_tolerance = tolerance;
        self
    }

    /// Sets the point perturbation.
    #[must_use]
    pub fn with_perturbation(mut self, perturbation: Perturbation) -> Self {
        self.point_perturbation = perturbation;
        self
    }

    /// Checks the settings for consistency.
    ///
    /// The perturbation radius must stay below half the tolerance so that
    /// shifting two points cannot move them across a tolerance boundary.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let tolerance = self.plane_distance_tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigurationError::InvalidTolerance(tolerance));
        }
        if let Perturbation::RandomShift { radius, .. } = self.point_perturbation {
            if !radius.is_finite() || radius < 0.0 {
                return Err(ConfigurationError::InvalidRadius(radius));
            }
            let limit = tolerance / 2.0;
            if radius >= limit {
                return Err(ConfigurationError::PerturbationTooLarge { radius, limit });
            }
        }
        Ok(())
    }
}
