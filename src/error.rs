use thiserror::Error;

/// Top-level error type for zone triangulation.
#[derive(Debug, Error)]
pub enum ZonemeshError {
    #[error(transparent)]
    Degenerate(#[from] DegenerateInputError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Input point sets that cannot be triangulated.
///
/// These are expected, recoverable conditions: the caller should ask for
/// more (or different) points and try again.
#[derive(Debug, Error)]
pub enum DegenerateInputError {
    #[error("need at least 3 points to triangulate, got {count}")]
    TooFewPoints { count: usize },

    #[error("point #{index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("fewer than 3 distinct points")]
    Coincident,

    #[error("all points are collinear within tolerance {tolerance}")]
    Collinear { tolerance: f64 },

    #[error("no consistent lower envelope: {0}")]
    InconsistentEnvelope(String),
}

/// Invalid triangulation settings, reported before any geometry is computed.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("plane distance tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),

    #[error("perturbation radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),

    #[error("perturbation radius {radius} must be smaller than half the plane distance tolerance ({limit})")]
    PerturbationTooLarge { radius: f64, limit: f64 },
}

/// Convenience type alias for results using [`ZonemeshError`].
pub type Result<T> = std::result::Result<T, ZonemeshError>;
