pub mod gauss_kruger;
pub mod meridian;
pub mod zoned;

use crate::ellipsoid::Ellipsoid;
use crate::error::GeodesyError;
use crate::point::{GeodeticPoint, PlanePoint};

/// Trait for plane projections supporting forward and inverse transforms.
pub trait Projection: Send + Sync {
    /// Forward: geodetic (radians) -> plane (northing, easting)
    fn forward(&self, point: GeodeticPoint) -> Result<PlanePoint, GeodesyError>;

    /// Inverse: plane (northing, easting) -> geodetic (radians)
    fn inverse(&self, point: PlanePoint) -> Result<GeodeticPoint, GeodesyError>;

    fn ellipsoid(&self) -> &Ellipsoid;
}
