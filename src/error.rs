use thiserror::Error;

/// Top-level error type for the granflow scenario kernel.
#[derive(Debug, Error)]
pub enum GranflowError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Packing(#[from] PackingError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

/// Errors related to boundary-surface construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to particle packing.
#[derive(Debug, Error)]
pub enum PackingError {
    #[error("radius range is inverted: min {min} > max {max}")]
    InvertedRadiusRange { min: f64, max: f64 },

    #[error("particle radius bound must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("target particle count must be positive")]
    ZeroTargetCount,

    #[error("vessel half-width {half_width} leaves no room for radius {max_radius}")]
    VesselTooNarrow { half_width: f64, max_radius: f64 },
}

/// Errors related to scenario assembly and stepping.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wall is not a planar half-space: {0}")]
    NotPlanar(String),

    #[error("invalid scenario parameter: {0}")]
    InvalidParameter(String),
}

/// Convenience type alias for results using [`GranflowError`].
pub type Result<T> = std::result::Result<T, GranflowError>;
