//! Geodetic ↔ Cartesian (earth-centred, earth-fixed) conversion.

use tracing::{trace, warn};

use crate::config::IterationLimit;
use crate::ellipsoid::Ellipsoid;
use crate::error::GeodesyError;
use crate::point::{CartesianPoint, GeodeticPoint};

/// Converts between geodetic and Cartesian coordinates on one ellipsoid.
#[derive(Clone, Copy, Debug)]
pub struct SpatialConverter {
    ellipsoid: Ellipsoid,
    limit: IterationLimit,
}

impl SpatialConverter {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self::with_limit(ellipsoid, IterationLimit::SPATIAL)
    }

    pub fn with_limit(ellipsoid: Ellipsoid, limit: IterationLimit) -> Self {
        Self { ellipsoid, limit }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn geodetic_to_spatial(&self, point: GeodeticPoint) -> CartesianPoint {
        let GeodeticPoint {
            latitude,
            longitude,
            height,
        } = point;
        let n = self.ellipsoid.radius_n(latitude);
        let (sin_b, cos_b) = latitude.sin_cos();
        let (sin_l, cos_l) = longitude.sin_cos();

        CartesianPoint::new(
            (n + height) * cos_b * cos_l,
            (n + height) * cos_b * sin_l,
            ((1.0 - self.ellipsoid.e1_sq()) * n + height) * sin_b,
        )
    }

    /// Iterative inverse. Longitude is exact; latitude is refined until
    /// successive values differ by less than the configured tolerance.
    pub fn spatial_to_geodetic(
        &self,
        point: CartesianPoint,
    ) -> Result<GeodeticPoint, GeodesyError> {
        let CartesianPoint { x, y, z } = point;
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Ok(GeodeticPoint::with_height(f64::NAN, f64::NAN, f64::NAN));
        }

        let e2 = self.ellipsoid.e1_sq();
        let lon = y.atan2(x);
        let q = x.hypot(y);

        let mut lat = (z / (q * (1.0 - e2))).atan();
        let mut converged = false;
        for iteration in 1..=self.limit.max_iterations {
            let n = self.ellipsoid.radius_n(lat);
            let next = ((z + n * e2 * lat.sin()) / q).atan();
            let delta = next - lat;
            lat = next;
            if delta.abs() < self.limit.tolerance {
                trace!(iterations = iteration, "geodetic latitude converged");
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                x,
                y,
                z,
                max_iterations = self.limit.max_iterations,
                "geodetic latitude did not converge"
            );
            return Err(GeodesyError::NonConvergence {
                solver: "spatial to geodetic",
                iterations: self.limit.max_iterations,
            });
        }

        let (sin_b, cos_b) = lat.sin_cos();
        let height =
            q * cos_b + z * sin_b - self.ellipsoid.radius_n(lat) * (1.0 - e2 * sin_b * sin_b);

        Ok(GeodeticPoint::with_height(lat, lon, height))
    }
}
