//! Ellipsoid geodesy: Gauss-Krüger projection, geodetic/Cartesian
//! conversion, seven-parameter datum shifts and the geodesic problems.
//!
//! Angles are radians throughout the library.

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod angle;
pub mod config;
pub mod datum;
pub mod ellipsoid;
pub mod error;
pub mod geodesic;
pub mod point;
pub mod proj;
pub mod spatial;
#[cfg(feature = "python")]
mod py;

pub use datum::{DatumTransformParameters, DatumTransformer};
pub use ellipsoid::{Ellipsoid, EllipsoidPreset};
pub use error::GeodesyError;
pub use geodesic::{GeodesicDirect, GeodesicInverse, GeodesicSolver};
pub use point::{CartesianPoint, GeodeticPoint, PlanePoint};
pub use proj::gauss_kruger::GaussKrugerProjector;
pub use proj::meridian::MeridianArcSolver;
pub use proj::zoned::ZonedProjector;
pub use proj::Projection;
pub use spatial::SpatialConverter;

/// Python extension module.
#[cfg(feature = "python")]
#[pymodule]
fn gk_geodesy(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
