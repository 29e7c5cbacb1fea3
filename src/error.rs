use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeodesyError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{solver} did not converge after {iterations} iterations")]
    NonConvergence {
        solver: &'static str,
        iterations: usize,
    },

    #[error("Unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeodesyError {
    /// True for failures raised by an iterative solver hitting its cap.
    pub fn is_non_convergence(&self) -> bool {
        matches!(self, Self::NonConvergence { .. })
    }
}
